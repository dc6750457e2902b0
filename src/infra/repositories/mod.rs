pub mod sqlite_booking_repo;
pub mod sqlite_calendar_block_repo;
pub mod sqlite_consultation_repo;
pub mod sqlite_hold_repo;
pub mod sqlite_job_repo;
pub mod sqlite_last_minute_repo;
pub mod sqlite_location_repo;
pub mod sqlite_media_repo;
pub mod sqlite_offering_repo;
pub mod sqlite_professional_repo;
pub mod sqlite_uow;
