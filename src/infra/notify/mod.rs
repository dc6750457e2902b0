pub mod http_notify_service;
