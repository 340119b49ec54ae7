pub mod assessments;

pub mod system;

pub use assessments::configure_assessments_routes;
pub use system::configure_system_routes;
