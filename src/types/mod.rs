// ABOUTME: Validated newtypes shared across the crate.
// ABOUTME: Exports AppId and ModuleName.

mod app_id;
mod module_name;

pub use app_id::{AppId, AppIdError};
pub use module_name::{DEFAULT_MODULE, ModuleName, ModuleNameError};
