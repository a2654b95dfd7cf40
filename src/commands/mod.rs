mod categories;
mod duplicates;
mod init;
mod plan;
mod scan;
mod util;

pub use categories::categories;
pub use duplicates::duplicates;
pub use init::init;
pub use plan::plan;
pub use scan::scan;
pub use util::{GlobalOptions, Workspace};
