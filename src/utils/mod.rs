pub mod file;
pub mod logging;
pub mod naming;
pub mod process;

pub use file::{copy_into, ensure_directory_exists, find_font_files, prepare_output_dir, safe_move_file};
pub use logging::{init_logging, LogFile};
pub use naming::{css_format, css_string, font_base_name, normalize_field};
pub use process::{resolve_tool, run_tool, ToolOutput};
