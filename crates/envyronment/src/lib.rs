//! Envyronment - read environment variables and convert them into typed values.
//!
//! ```
//! use envyronment::{to_bool, to_list, EnvReader, MapEnvironment};
//!
//! let env = MapEnvironment::new()
//!     .with("GARDEN_TOOLS", "shovel,rake,watering_can")
//!     .with("GARDEN_DEBUG", "yes");
//! let reader = EnvReader::new(env);
//!
//! assert_eq!(
//!     reader.read_as("GARDEN_TOOLS", to_list)?,
//!     ["shovel", "rake", "watering_can"]
//! );
//! assert!(reader.read_as("GARDEN_DEBUG", to_bool)?);
//! assert_eq!(reader.read_or("GARDEN_NAME", "allotment")?, "allotment");
//! assert!(reader.read("GARDEN_NAME").unwrap_err().is_missing());
//! # Ok::<(), envyronment::EnvError>(())
//! ```
//!
//! The free functions ([`read`], [`read_as`], ...) do the same against the
//! process environment. Call [`init`] once at start-up to load a `.env` file
//! first.

pub mod convert;
pub mod dotenv;
pub mod environment;
pub mod error;
pub mod reader;


pub use convert::{
    to_bool, to_dirpath, to_filepath, to_json, to_json_as, to_list, to_parsed, FALSE_LITERALS,
    TRUE_LITERALS,
};
pub use dotenv::{init, init_with, is_initialized, DotenvConfig, DotenvReport, DEFAULT_DOTENV_FILE};
pub use environment::{EnvironmentPort, MapEnvironment, SystemEnvironment};
pub use error::{BoxError, ConvertError, EnvError, ValueOrigin};
pub use reader::{
    read, read_as, read_as_opt, read_as_or, read_as_or_convert, read_or, read_with, EnvReader,
    Fallback,
};
