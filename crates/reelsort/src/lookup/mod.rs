//! Online title lookup used when a name carries no recognizable year.

pub mod omdb;

use log::{info, warn};

use crate::config::Settings;
use crate::title::TitleYear;

pub use omdb::OmdbClient;

/// Resolves a free-text title to a canonical `(title, year)`.
///
/// Implementations never fail: transport and parse problems are "not found".
pub trait MetadataLookup {
    fn lookup(&self, title: &str) -> Option<TitleYear>;
}

impl<T: MetadataLookup + ?Sized> MetadataLookup for Box<T> {
    fn lookup(&self, title: &str) -> Option<TitleYear> {
        (**self).lookup(title)
    }
}

impl<T: MetadataLookup + ?Sized> MetadataLookup for &T {
    fn lookup(&self, title: &str) -> Option<TitleYear> {
        (**self).lookup(title)
    }
}

/// Used when lookups are disabled or no API key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl MetadataLookup for NoLookup {
    fn lookup(&self, _title: &str) -> Option<TitleYear> {
        None
    }
}

/// Picks the lookup implementation the settings ask for. A missing API key
/// or a client that cannot be built degrades to [`NoLookup`].
pub fn from_settings(settings: &Settings) -> Box<dyn MetadataLookup> {
    let lookup = &settings.lookup;
    if !lookup.enabled {
        info!("Title lookup disabled");
        return Box::new(NoLookup);
    }

    let Some(api_key) = lookup.api_key.as_ref() else {
        warn!("Title lookup enabled but no API key configured; names without a year will be skipped");
        return Box::new(NoLookup);
    };

    match OmdbClient::new(
        &lookup.base_url,
        api_key,
        lookup.connect_timeout,
        lookup.timeout,
    ) {
        Ok(client) => {
            info!("Title lookup via {}", lookup.base_url);
            Box::new(client)
        }
        Err(e) => {
            warn!("Title lookup unavailable: {}", e);
            Box::new(NoLookup)
        }
    }
}
