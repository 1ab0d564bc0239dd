pub mod classpath;
pub mod command;

pub use classpath::build_classpath;
pub use command::{build_launch_plan, run, LaunchPlan, RuntimeIdentity};
