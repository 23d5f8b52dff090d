pub mod config;
pub mod doctor;
pub mod external;
pub mod links;
pub mod machine;
pub mod model;
pub mod state;
pub mod tui;

mod tui_shell;
