pub mod certificates;
pub mod cycles;
pub mod evaluations;
pub mod interests;
pub mod matches;
pub mod mentorships;
pub mod profiles;
pub mod programs;
pub mod progress;
pub mod tasks;
