mod compose;
mod dropdown;
mod email_view;
mod settings;
mod summary;
mod thread_view;
mod types;

pub use compose::*;
pub use dropdown::*;
pub use email_view::*;
pub use settings::*;
pub use summary::*;
pub use thread_view::*;
pub use types::*;
