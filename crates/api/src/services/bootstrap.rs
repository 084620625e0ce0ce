//! Startup seeding of event structure.
//!
//! An event edition is hosted by one district with a fixed list of
//! churches. Seeding runs at startup, inserts whatever is missing, and
//! leaves existing rows untouched, so restarting the server is always safe.

use sqlx::PgPool;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::BootstrapConfig;
use persistence::repositories::{ChurchRepository, DistrictRepository};

/// Bootstrap errors.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Seed the configured district and its churches, if bootstrap is enabled.
pub async fn bootstrap_event_data(
    pool: &PgPool,
    config: &BootstrapConfig,
) -> Result<(), BootstrapError> {
    if !config.enabled {
        debug!("Bootstrap disabled, skipping seed");
        return Ok(());
    }

    let district_repo = DistrictRepository::new(pool.clone());
    let church_repo = ChurchRepository::new(pool.clone());

    let district_name = config.district_name.trim();
    let district = match district_repo.find_by_name(district_name).await? {
        Some(existing) => {
            debug!(district_id = %existing.id, name = %existing.name, "District already seeded");
            existing
        }
        None => {
            let created = district_repo.create(district_name).await?;
            info!(district_id = %created.id, name = %created.name, "Seeded district");
            created
        }
    };

    let mut seeded = 0usize;
    for church_name in &config.church_names {
        let church_name = church_name.trim();
        if church_name.is_empty() {
            continue;
        }

        if church_repo
            .find_by_name_in_district(church_name, district.id)
            .await?
            .is_none()
        {
            let created = church_repo.create(church_name, district.id).await?;
            info!(church_id = %created.id, name = %created.name, "Seeded church");
            seeded += 1;
        }
    }

    info!(
        district = %district.name,
        churches_total = config.church_names.len(),
        churches_seeded = seeded,
        "Bootstrap complete"
    );

    Ok(())
}
