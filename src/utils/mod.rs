pub mod logging;
pub mod paths;
pub mod terminal;

pub use paths::{
    DEFAULT_ROUTE_PREFIX, display_path, format_path_with_tilde, relative_asset_path,
    resolve_asset_path, validate_relative_path,
};
