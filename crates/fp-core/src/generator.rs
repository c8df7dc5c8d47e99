//! Procedural house layout.
//!
//! A deterministic grid heuristic, not a solver: size a rectangle from the
//! square footage, wall its perimeter, cut it into horizontal bands and
//! columns, then hand out room names in priority order. Cells come from a
//! grid partition, so they never overlap.

use crate::geometry::{Bounds, Vec2};
use crate::model::Plan;
use serde::{Deserialize, Serialize};

/// Square centimeters per square foot.
pub const CM2_PER_SQFT: f64 = 929.03;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HouseStyle {
    #[default]
    Modern,
    Traditional,
    Ranch,
    Colonial,
}

impl HouseStyle {
    /// Width / height of the footprint.
    pub fn aspect(self) -> f64 {
        match self {
            HouseStyle::Ranch => 3.0,
            HouseStyle::Modern => 1.6,
            HouseStyle::Traditional | HouseStyle::Colonial => 1.3,
        }
    }
}

/// Generator parameters. Missing JSON fields take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorInput {
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub garage_spots: u32,
    pub sqft: f64,
    pub style: HouseStyle,
}

impl Default for GeneratorInput {
    fn default() -> Self {
        Self {
            bedrooms: 3,
            bathrooms: 2,
            garage_spots: 2,
            sqft: 1800.0,
            style: HouseStyle::Modern,
        }
    }
}

/// Build a fresh plan for `input`. Perimeter walls get `wall_thickness`.
pub fn generate_plan(input: &GeneratorInput, wall_thickness: f64) -> Plan {
    let area = input.sqft.max(0.0) * CM2_PER_SQFT;
    let aspect = input.style.aspect();
    let width = (area * aspect).sqrt();
    let height = width / aspect;
    let footprint = Bounds::from_corners(Vec2::ZERO, Vec2::new(width, height));

    let mut plan = Plan::new();
    let corners = footprint.corners();
    for i in 0..4 {
        plan.push_wall(corners[i], corners[(i + 1) % 4], wall_thickness);
    }

    let extra_band = u32::from(input.bathrooms > 1);
    let bands = input.bedrooms.saturating_add(extra_band).clamp(1, 4);
    let band_height = height / f64::from(bands);

    let mut namer = RoomNamer::new(input);
    for band in 0..bands {
        let y0 = f64::from(band) * band_height;
        let cols = if band == 0 && input.garage_spots > 0 {
            input.garage_spots.min(2)
        } else {
            3
        };
        let col_width = width / f64::from(cols);
        for col in 0..cols {
            let x0 = f64::from(col) * col_width;
            let cell = Bounds::from_corners(
                Vec2::new(x0, y0),
                Vec2::new(x0 + col_width, y0 + band_height),
            );
            let name = namer.next(band, col);
            plan.push_room(cell.corners().to_vec(), Some(name));
        }
    }

    log::debug!(
        "generated {:?} layout: {:.0}x{:.0} cm, {} bands, {} rooms",
        input.style,
        width,
        height,
        bands,
        plan.rooms.len()
    );
    plan
}

/// Hands out names: garages first, then bedrooms, baths, one living room,
/// one kitchen, and plain rooms for whatever is left.
struct RoomNamer {
    garages: u32,
    bedrooms_wanted: u32,
    baths_wanted: u32,
    bedrooms: u32,
    baths: u32,
    living: bool,
    kitchen: bool,
}

impl RoomNamer {
    fn new(input: &GeneratorInput) -> Self {
        Self {
            garages: input.garage_spots.min(2),
            bedrooms_wanted: input.bedrooms,
            baths_wanted: input.bathrooms,
            bedrooms: 0,
            baths: 0,
            living: false,
            kitchen: false,
        }
    }

    fn next(&mut self, band: u32, col: u32) -> String {
        if band == 0 && col < self.garages {
            "Garage".to_string()
        } else if self.bedrooms < self.bedrooms_wanted {
            self.bedrooms += 1;
            format!("Bedroom {}", self.bedrooms)
        } else if self.baths < self.baths_wanted {
            self.baths += 1;
            format!("Bath {}", self.baths)
        } else if !self.living {
            self.living = true;
            "Living".to_string()
        } else if !self.kitchen {
            self.kitchen = true;
            "Kitchen".to_string()
        } else {
            "Room".to_string()
        }
    }
}
