//! # Airplane Composer
//!
//! Assembles a fuselage, two main wings, two tail wings, a vertical fin and
//! pylon-mounted engines, then consolidates them into one tree.
//!
//! ## Frame
//!
//! The fuselage runs along X with the nose at -X and the tail at +X; the
//! right wing spans +Z.
//! Every part is finally lifted by half the fuselage height.
//!
//! ## Palette
//!
//! One draw from the random source picks a hue step on a 256-step wheel for
//! the fuselage; the wings take the complementary step. Both are fully
//! saturated. Materials given in the options take precedence.

#[cfg(test)]
mod tests;

use crate::anchors::{recentre, vertical_extent};
use crate::builders::engine::{build_engine, EngineOptions, PartialEngineOptions};
use crate::builders::wing::{build_wing, PartialWingOptions, WingBuilderVersion, WingOptions};
use crate::color::{complementary_hue_step, Color3};
use crate::consolidate::{consolidate, Part};
use crate::error::BuildError;
use crate::options::{resolve, DefaultOptions, Resolve};
use crate::profiles::{
    engine_holder_profile, fin_profile, pixels_to_profile, A380_STRETCH_BODY, B747_BODY,
};
use crate::random::SharedRandom;
use crate::scene::{Material, MaterialRef, Node, Scene, Solid};
use config::constants::{
    clamp_unit, BODY_PATH_STATIONS, ENGINE_HOLDER_SCALE, FIN_PROFILE_SCALE, HUE_WHEEL_STEPS,
    PROFILE_SCALE,
};
use glam::{DVec2, DVec3};
use log::debug;
use lowpoly_mesh::ops::{sweep, Cap, SideOrientation, Station, SweepParams};
use lowpoly_mesh::{rotation_yaw_pitch_roll, Mesh, Transform};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Span fraction of the engine when a wing carries only one.
const SINGLE_ENGINE_SPAN: f64 = 0.33;
/// Pylon shift towards the nose from the wing root.
const MOUNT_SHIFT_X: f64 = 0.2;
const ENGINE_LENGTH_FACTOR: f64 = 0.8;
const FIN_DEPTH: f64 = 0.025;
const FIN_SHIFT_X: f64 = 4.2;

builder_version! {
    /// Versions of the airplane defaults.
    AirplaneBuilderVersion
}

/// Fuselage silhouette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AirplaneBody {
    #[default]
    B747,
    A380Stretch,
}

impl AirplaneBody {
    fn pixels(self) -> &'static [f64] {
        match self {
            AirplaneBody::B747 => &B747_BODY,
            AirplaneBody::A380Stretch => &A380_STRETCH_BODY,
        }
    }
}

/// Parts that can be kept out of the merged solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AirplanePart {
    Body,
    MainWingLeft,
    MainWingRight,
    TailWingLeft,
    TailWingRight,
    TailWingTop,
    Engine,
    EngineHolder,
}

impl AirplanePart {
    pub const ALL: [AirplanePart; 8] = [
        AirplanePart::Body,
        AirplanePart::MainWingLeft,
        AirplanePart::MainWingRight,
        AirplanePart::TailWingLeft,
        AirplanePart::TailWingRight,
        AirplanePart::TailWingTop,
        AirplanePart::Engine,
        AirplanePart::EngineHolder,
    ];
}

creation_options! {
    /// Options for [`create_airplane`].
    pub struct AirplaneOptions / PartialAirplaneOptions : AirplaneBuilderVersion {
        engines_per_wing: u32,
        body: AirplaneBody,
        body_material: Option<MaterialRef>,
        /// Falls back to the tail wing material
        fin_material: Option<MaterialRef>,
        /// Resolved against the airplane's main wing proportions
        main_wing: PartialWingOptions,
        /// Resolved against the airplane's tail wing proportions
        tail_wing: PartialWingOptions,
        engine: PartialEngineOptions,
        engine_holder_width: f64,
        engine_holder_height: f64,
        engine_holder_depth: f64,
        engine_holder_skewing: f64,
        /// Source of the palette draw
        random: SharedRandom,
    }
}

impl DefaultOptions for AirplaneOptions {
    type Version = AirplaneBuilderVersion;

    fn default_options(version: AirplaneBuilderVersion) -> Self {
        match version {
            AirplaneBuilderVersion::V1 => Self {
                version,
                engines_per_wing: 2,
                body: AirplaneBody::B747,
                body_material: None,
                fin_material: None,
                main_wing: PartialWingOptions::default(),
                tail_wing: PartialWingOptions::default(),
                engine: PartialEngineOptions::default(),
                engine_holder_width: 2.0,
                engine_holder_height: 1.0,
                engine_holder_depth: 0.125,
                engine_holder_skewing: 1.2,
                random: SharedRandom::default(),
            },
        }
    }
}

/// Main wing proportions of an airplane.
pub fn main_wing_defaults(version: WingBuilderVersion) -> WingOptions {
    let length = 4.0;
    WingOptions {
        length,
        width: length * 0.35,
        yaw: PI / 8.0,
        pitch: 0.0,
        height: 0.061,
        ..WingOptions::default_options(version)
    }
}

/// Tail wing proportions, derived from the resolved main wing.
pub fn tail_wing_defaults(
    version: WingBuilderVersion,
    main_wing: &WingOptions,
) -> WingOptions {
    WingOptions {
        length: 1.3,
        width: main_wing.length * 0.2,
        yaw: PI / 8.0,
        pitch: PI / 32.0,
        height: 0.03,
        ..WingOptions::default_options(version)
    }
}

/// Creates an airplane from partial options.
///
/// Parts whose tag is in `excluded` stay standalone children of the
/// returned root.
pub fn create_airplane(
    name: &str,
    scene: &mut Scene,
    options: PartialAirplaneOptions,
    excluded: &[AirplanePart],
) -> Result<Node, BuildError> {
    build_airplane(name, scene, &options.resolve(), excluded)
}

/// Creates an airplane from complete options.
pub fn build_airplane(
    name: &str,
    scene: &mut Scene,
    options: &AirplaneOptions,
    excluded: &[AirplanePart],
) -> Result<Node, BuildError> {
    let palette = Palette::draw(&options.random);

    // Wings and their materials
    let main_version = options.main_wing.version.unwrap_or_default();
    let mut main = resolve(options.main_wing.clone(), main_wing_defaults(main_version));
    let main_material = match &main.material {
        Some(material) => material.clone(),
        None => scene.add_material(Material::new(format!("{}_wings", name)).with_diffuse(palette.wings)),
    };
    main.material = Some(main_material.clone());

    let tail_version = options.tail_wing.version.unwrap_or_default();
    let mut tail = resolve(options.tail_wing.clone(), tail_wing_defaults(tail_version, &main));
    let tail_material = match &tail.material {
        Some(material) => material.clone(),
        None => main_material.clone(),
    };
    tail.material = Some(tail_material.clone());

    let body_material = match &options.body_material {
        Some(material) => material.clone(),
        None => scene.add_material(Material::new(format!("{}_body", name)).with_diffuse(palette.body)),
    };

    let mut engine = options.engine.clone().resolve();
    engine.body_material.get_or_insert_with(|| body_material.clone());
    engine.innard_material.get_or_insert_with(|| main_material.clone());
    engine.ring_material.get_or_insert_with(|| main_material.clone());

    // Fuselage
    let (body_mesh, body_height) = fuselage(options.body)?;
    let body = Solid::new("body", body_mesh, body_material);

    let engines_per_wing = options.engines_per_wing;
    let engine_scale = if engines_per_wing == 1 { 0.20 } else { 0.15 };

    let wing_shift = DVec3::new(
        -10.0 / 12.0,
        -0.30 - (0.15 - (engine.scale - 1.0) * 0.3 - engine_scale) * 1.4,
        0.34,
    );
    let mut right_wing = build_wing(
        "wing_main_right",
        scene,
        &WingOptions {
            right: true,
            ..main.clone()
        },
    )?;
    let mut left_wing = build_wing(
        "wing_main_left",
        scene,
        &WingOptions {
            right: false,
            ..main.clone()
        },
    )?;
    right_wing.transform.position += wing_shift;
    left_wing.transform.position += wing_shift * DVec3::new(1.0, 1.0, -1.0);

    let tail_shift = DVec3::new(3.5, 0.1, 0.14);
    let mut right_tail = build_wing(
        "wing_tail_right",
        scene,
        &WingOptions {
            right: true,
            ..tail.clone()
        },
    )?;
    let mut left_tail = build_wing(
        "wing_tail_left",
        scene,
        &WingOptions {
            right: false,
            ..tail.clone()
        },
    )?;
    right_tail.transform.position += tail_shift;
    left_tail.transform.position += tail_shift * DVec3::new(1.0, 1.0, -1.0);

    // Vertical fin
    let fin_mesh = sweep(
        &fin_profile(FIN_PROFILE_SCALE),
        &[DVec3::ZERO, DVec3::new(0.0, 0.0, FIN_DEPTH)],
        &SweepParams::new().cap(Cap::All).side(SideOrientation::Double),
    )?;
    let fin_lift = fin_mesh.extend_size().y / 2.0;
    let fin_material = options
        .fin_material
        .clone()
        .unwrap_or_else(|| tail_material.clone());
    let mut fin = Solid::new("top_tail_wing", fin_mesh, fin_material);
    fin.transform.position += DVec3::new(FIN_SHIFT_X, fin_lift, 0.0);

    // Engines and pylons
    let holder = Holder::new(options)?;
    let mut engines = Vec::with_capacity(2 * engines_per_wing as usize);
    let mut holders = Vec::with_capacity(2 * engines_per_wing as usize);
    for side in [Side::Left, Side::Right] {
        let wing_position = match side {
            Side::Left => left_wing.transform.position,
            Side::Right => right_wing.transform.position,
        };
        let engine_options = match side {
            Side::Left => engine.clone(),
            Side::Right => EngineOptions {
                angle: PI,
                ..engine.clone()
            },
        };

        for (i, mount) in engine_mounts(wing_position, &main, engines_per_wing, side)
            .into_iter()
            .enumerate()
        {
            holders.push(holder.place(&format!("holder_{}_{}", side.label(), i + 1), mount, &tail_material));

            let mut solid = build_engine(
                &format!("engine_{}_{}", side.label(), i + 1),
                scene,
                &engine_options,
            )?;
            let (min, max) = solid.mesh.bounding_box();
            let engine_height = max.y - min.y;
            solid.transform.position = mount
                - DVec3::new(
                    holder.width * ENGINE_HOLDER_SCALE * 2.0,
                    holder.height * ENGINE_HOLDER_SCALE + engine_height * engine_scale,
                    0.0,
                );
            solid.transform.scaling =
                DVec3::new(engine_scale * ENGINE_LENGTH_FACTOR, engine_scale, engine_scale);
            engines.push(solid);
        }
    }

    let lift = DVec3::new(0.0, body_height / 2.0, 0.0);
    let mut parts = vec![
        Part::tagged(AirplanePart::Body, body),
        Part::tagged(AirplanePart::MainWingLeft, left_wing),
        Part::tagged(AirplanePart::MainWingRight, right_wing),
        Part::tagged(AirplanePart::TailWingLeft, left_tail),
        Part::tagged(AirplanePart::TailWingRight, right_tail),
        Part::tagged(AirplanePart::TailWingTop, fin),
    ];
    parts.extend(engines.into_iter().map(|e| Part::tagged(AirplanePart::Engine, e)));
    parts.extend(holders.into_iter().map(|h| Part::tagged(AirplanePart::EngineHolder, h)));
    for part in &mut parts {
        part.solid.transform.position += lift;
    }

    debug!(
        "airplane '{}': {:?} body, {} engines per wing, hue step {}",
        name, options.body, engines_per_wing, palette.hue_step
    );
    Ok(consolidate(name, parts, excluded))
}

/// Fuselage swept along a half circle with a sinusoidal bulge. Also returns
/// the silhouette height.
fn fuselage(body: AirplaneBody) -> Result<(Mesh, f64), BuildError> {
    let mut shape: Vec<DVec2> = pixels_to_profile(body.pixels(), PROFILE_SCALE);
    let height = vertical_extent(&shape);
    recentre(&mut shape);

    let last = (BODY_PATH_STATIONS - 1) as f64;
    let path: Vec<DVec3> = (0..BODY_PATH_STATIONS)
        .map(|i| DVec3::new(0.0, 0.0, (i as f64 / last * PI).cos()))
        .collect();
    let bulge = |station: Station| (station.fraction() * PI).sin();
    let mut mesh = sweep(
        &shape,
        &path,
        &SweepParams::new()
            .scale(&bulge)
            .side(SideOrientation::Double),
    )?;

    mesh.bake(&Transform::from_scaling(DVec3::new(1.0, 1.0, 0.5)));
    mesh.compute_normals();
    Ok((mesh, height))
}

/// Hue step of the fuselage and the two derived colours.
#[derive(Debug, Clone, Copy)]
struct Palette {
    hue_step: u32,
    body: Color3,
    wings: Color3,
}

impl Palette {
    fn draw(random: &SharedRandom) -> Self {
        let max_step = (HUE_WHEEL_STEPS - 1) as f64;
        let hue_step = (random.next() * max_step).round() as u32;
        Self {
            hue_step,
            body: Color3::from_hue_step(hue_step),
            wings: Color3::from_hue_step(complementary_hue_step(hue_step)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn label(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Points on a wing where pylons attach, spread evenly over the span and
/// following the wing's sweep.
fn engine_mounts(wing_position: DVec3, wing: &WingOptions, count: u32, side: Side) -> Vec<DVec3> {
    let (yaw, direction) = match side {
        Side::Left => (-wing.yaw, -1.0),
        Side::Right => (wing.yaw, 1.0),
    };
    let sweep = rotation_yaw_pitch_roll(yaw, 0.0, 0.0);
    let falloff = clamp_unit(wing.falloff);

    (0..count)
        .map(|i| {
            let span = if count == 1 {
                SINGLE_ENGINE_SPAN
            } else {
                (i + 1) as f64 / (count + 1) as f64
            };
            let shift = DVec3::new(
                wing.width / 2.0 * (1.0 - falloff) * span,
                0.0,
                direction * span * wing.length,
            );
            wing_position + DVec3::new(MOUNT_SHIFT_X, 0.0, 0.0) + sweep.transform_point3(shift)
        })
        .collect()
}

/// The pylon solid, built once and placed per engine.
struct Holder {
    mesh: Mesh,
    width: f64,
    height: f64,
    depth: f64,
}

impl Holder {
    fn new(options: &AirplaneOptions) -> Result<Self, BuildError> {
        let shape = engine_holder_profile(
            options.engine_holder_width,
            options.engine_holder_height,
            options.engine_holder_skewing,
            ENGINE_HOLDER_SCALE,
        );
        let path = [DVec3::ZERO, DVec3::new(0.0, 0.0, options.engine_holder_depth)];
        let mut mesh = sweep(
            &shape,
            &path,
            &SweepParams::new().cap(Cap::All).side(SideOrientation::Double),
        )?;
        mesh.to_flat_shaded();
        Ok(Self {
            mesh,
            width: options.engine_holder_width,
            height: options.engine_holder_height,
            depth: options.engine_holder_depth,
        })
    }

    fn place(&self, name: &str, mount: DVec3, material: &MaterialRef) -> Solid {
        let mut solid = Solid::new(name, self.mesh.clone(), material.clone());
        solid.transform.position = mount
            + DVec3::new(
                0.0,
                -(self.height * ENGINE_HOLDER_SCALE + 0.3 * ENGINE_HOLDER_SCALE),
                self.depth / 2.0,
            );
        solid.transform.rotation.y = PI;
        solid
    }
}
