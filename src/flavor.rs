//! Client variants sharing one API surface.

use serde::{Deserialize, Serialize};

/// Which audience this client serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    #[default]
    Customer,
    Restaurant,
    Rider,
}

impl Flavor {
    /// Role string the backend expects on login and OAuth requests.
    pub fn role(self) -> &'static str {
        match self {
            Flavor::Customer => "customer",
            Flavor::Restaurant => "owner",
            Flavor::Rider => "rider",
        }
    }
}

impl std::fmt::Display for Flavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Flavor::Customer => "customer",
            Flavor::Restaurant => "restaurant",
            Flavor::Rider => "rider",
        };
        f.write_str(name)
    }
}
