use std::sync::Arc;
use crate::domain::ports::{
    BookingRepository, CalendarBlockRepository, ConsultationRepository, HoldRepository,
    IdentityService, JobRepository, LastMinuteRepository, LocationRepository, MediaRepository,
    NotifyService, OfferingRepository, ProfessionalRepository, TransactionManager,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub professional_repo: Arc<dyn ProfessionalRepository>,
    pub offering_repo: Arc<dyn OfferingRepository>,
    pub location_repo: Arc<dyn LocationRepository>,
    pub calendar_block_repo: Arc<dyn CalendarBlockRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub hold_repo: Arc<dyn HoldRepository>,
    pub consultation_repo: Arc<dyn ConsultationRepository>,
    pub last_minute_repo: Arc<dyn LastMinuteRepository>,
    pub media_repo: Arc<dyn MediaRepository>,
    pub job_repo: Arc<dyn JobRepository>,
    pub tx_manager: Arc<dyn TransactionManager>,
    pub identity_service: Arc<dyn IdentityService>,
    pub notify_service: Arc<dyn NotifyService>,
}
