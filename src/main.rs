//! Small demonstration: localize an agent inside a square perimeter of four
//! colored landmarks.

use nalgebra::Vector2;

use triangulation::{
    Color, HeadingContext, Landmark, LandmarkRegistry, LocalizationConfig, Localizer, Observation,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = LandmarkRegistry::new();
    registry.register(Landmark::new(Color::Red, 0.0, 0.0))?;
    registry.register(Landmark::new(Color::Green, 10.0, 0.0))?;
    registry.register(Landmark::new(Color::Blue, 10.0, 10.0))?;
    registry.register(Landmark::new(Color::Yellow, 0.0, 10.0))?;

    // Facing the red-green side from inside the square, no turn yet
    let heading = HeadingContext::new(Vector2::new(0.0, -1.0), 0.0, 0.0);
    let localizer = Localizer::new(registry.clone(), heading.clone());

    // Two simultaneous sightings, left to right: the agent stands at (3,4)
    let pair = [
        Observation::new(Color::Red, 36.87),
        Observation::new(Color::Green, -60.255),
    ];
    let estimate = localizer.locate(&pair)?;
    println!("pair cycle estimate: ({}, {})", estimate.x, estimate.y);

    // A third sighting tightens the pool; the symmetric square needs a
    // slightly lower agreement threshold for the extra diagonal pair
    let config = LocalizationConfig {
        equality_threshold_m: 0.1,
        frequency_threshold_pct: 75.0,
    };
    let localizer = Localizer::with_config(registry, heading, &config);

    let triple = [
        Observation::new(Color::Red, 36.87),
        Observation::new(Color::Green, -60.255),
        Observation::new(Color::Blue, -130.601),
    ];
    let estimate = localizer.locate(&triple)?;
    println!("triple cycle estimate: ({}, {})", estimate.x, estimate.y);

    Ok(())
}
