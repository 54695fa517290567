use crate::domain::{Season, SeasonKey};

/// Archived seasons re-fetched by `--with-archives`
///
/// The site keeps past seasons under `?year=`; this is every season the
/// league has published since it moved to the current site.
pub fn get_archive_seasons() -> Vec<SeasonKey> {
    vec![
        SeasonKey::archived(Season::Winter, 2023),
        SeasonKey::archived(Season::Spring, 2023),
        SeasonKey::archived(Season::Summer, 2023),
        SeasonKey::archived(Season::Winter, 2024),
        SeasonKey::archived(Season::Spring, 2024),
        SeasonKey::archived(Season::Summer, 2024),
        SeasonKey::archived(Season::Winter, 2025),
        SeasonKey::archived(Season::Spring, 2025),
        SeasonKey::archived(Season::Summer, 2025),
    ]
}
