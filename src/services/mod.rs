pub mod analytics_service;
pub mod cycles_service;
pub mod evaluations_service;
pub mod interests_service;
pub mod matches_service;
pub mod matching_service;
pub mod mentorships_service;
pub mod programs_service;

pub use analytics_service::AnalyticsService;
pub use cycles_service::CyclesService;
pub use evaluations_service::EvaluationsService;
pub use interests_service::InterestsService;
pub use matches_service::MatchesService;
pub use matching_service::MatchingService;
pub use mentorships_service::MentorshipsService;
pub use programs_service::ProgramsService;
