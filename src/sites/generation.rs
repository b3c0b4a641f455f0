//! Site generation from the seeded RNG

use rand::Rng;

use crate::core::config::GameConfig;
use crate::core::types::SiteId;
use crate::sites::site::{Site, SiteGeology};

/// Generate the candidate sites for a new game
///
/// Temperatures and costs are whole numbers, drawn from the configured
/// `[min, max)` ranges; capacity stays fractional.
pub fn generate_sites<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Vec<Site> {
    let ranges = &config.sites;
    (0..config.site_count)
        .map(|i| {
            let geology = SiteGeology {
                temperature: draw_whole(rng, ranges.temperature),
                thermal_capacity: rng.gen_range(ranges.thermal_capacity[0]..ranges.thermal_capacity[1]),
                drilling_cost: draw_whole(rng, ranges.drilling_cost),
                construction_cost: draw_whole(rng, ranges.construction_cost),
            };
            Site::new(SiteId(i as u32), site_name(i), geology)
        })
        .collect()
}

/// "Site A" .. "Site Z", then "Site A2", "Site B2", ...
fn site_name(index: usize) -> String {
    let letter = (b'A' + (index % 26) as u8) as char;
    match index / 26 {
        0 => format!("Site {}", letter),
        round => format!("Site {}{}", letter, round + 1),
    }
}

fn draw_whole<R: Rng + ?Sized>(rng: &mut R, [min, max]: [f64; 2]) -> f64 {
    rng.gen_range(min..max).floor()
}
