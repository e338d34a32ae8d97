//! Scrapes a CRAN snapshot's web catalogue and turns a package's dependency tree into an install script.

pub mod error;
pub use error::Result;
pub use error::Error;

pub mod config;
pub use config::CranParserOptions;

pub mod fetch;
pub use fetch::DocumentSource;
pub use fetch::HttpSource;

pub mod package;
pub use package::PackageRef;
pub use package::PackageListing;
pub use package::ResolvedPackage;
pub use package::Dependency;

pub mod extract;

pub mod catalogue;
pub use catalogue::CranParser;

pub mod resolver;
pub use resolver::ResolveOptions;
pub use resolver::ResolveMode;

pub mod script;
pub use script::InstallScript;
