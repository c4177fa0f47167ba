//! # Car Composer
//!
//! Builds a randomly proportioned car: a side outline extruded into two body
//! panels joined by a skin, glazed side windows, sloped windshield and rear
//! window panes, four wheels, head and tail lights and two license plates.
//!
//! ## Random draws
//!
//! Every draw comes from the options' random source, in this order:
//!
//! 1. Six shape offsets, see [`Proportions::draw`]
//! 2. The window frame size
//! 3. Three body color channels, only when no body color is given
//! 4. Head lights: side count (one or two draws), half turn, drop, inset
//!    and, for square lights, stretch
//! 5. Tail lights: half turn, drop, inset, stretch
//!
//! A fixed source therefore reproduces the same car.
//!
//! ## Frame
//!
//! The car faces -X with its wheels on `y = 0`; the left side is at -Z.
//! Right side wheels and lights are mirror images of the left ones.

mod silhouette;
mod windows;


pub use silhouette::{Proportions, Silhouette};
pub use windows::{cut_windows, pane_frame, pane_glass, WindowCutouts};

use crate::anchors::stand_up;
use crate::builders::car_light::{build_car_light, CarLightOptions};
use crate::builders::wheel::{build_wheel, WheelOptions};
use crate::color::Color3;
use crate::consolidate::{consolidate, Part};
use crate::error::BuildError;
use crate::options::{DefaultOptions, Resolve};
use crate::random::SharedRandom;
use crate::scene::{Material, MaterialRef, MirrorAxis, Node, Scene, Solid};
use config::constants::DEFAULT_WHEEL_QUALITY;
use glam::DVec3;
use log::debug;
use lowpoly_mesh::ops::{extrude_polygon, Polygon2D, PolygonExtrudeParams};
use lowpoly_mesh::Mesh;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Light radius at `light_size = 1`.
const LIGHT_RADIUS: f64 = 0.09;
const PLATE_RADIUS: f64 = 0.1;
const HUBCAP_SIZE: f64 = 0.5;
const SQUARE_LIGHT_SIDES: u32 = 4;
const MAX_EXTRA_HEAD_LIGHT_SIDES: f64 = 6.0;

builder_version! {
    /// Versions of the car defaults.
    CarBuilderVersion
}

/// Size and aspect ratio of a license plate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LicensePlateType {
    /// Scale of the plate's long side
    pub size: f64,
    /// Long side over short side
    pub ratio: f64,
}

impl LicensePlateType {
    pub const EU: LicensePlateType = LicensePlateType {
        size: 2.25,
        ratio: 520.0 / 110.0,
    };
    pub const US: LicensePlateType = LicensePlateType {
        size: 1.5,
        ratio: 12.0 / 6.0,
    };
}

/// Parts that can be kept out of the merged solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarPart {
    WheelFrontLeft,
    WheelFrontRight,
    WheelRearLeft,
    WheelRearRight,
    LightHeadLeft,
    LightHeadRight,
    LightTailLeft,
    LightTailRight,
    LicensePlateFront,
    LicensePlateRear,
}

impl CarPart {
    pub const ALL: [CarPart; 10] = [
        CarPart::WheelFrontLeft,
        CarPart::WheelFrontRight,
        CarPart::WheelRearLeft,
        CarPart::WheelRearRight,
        CarPart::LightHeadLeft,
        CarPart::LightHeadRight,
        CarPart::LightTailLeft,
        CarPart::LightTailRight,
        CarPart::LicensePlateFront,
        CarPart::LicensePlateRear,
    ];
}

creation_options! {
    /// Options for [`create_car`]. Colors are `#RRGGBB` strings.
    pub struct CarOptions / PartialCarOptions : CarBuilderVersion {
        random: SharedRandom,
        max_hood_offset: f64,
        max_back_seat_offset: f64,
        /// Scale of the head and tail lights
        light_size: f64,
        /// Applied to every color
        global_color_multiplier: f64,
        /// Random when absent
        body_color: Option<String>,
        /// Darkens the body color
        body_color_multiplier: f64,
        /// Emissive share of every color
        color_emission: f64,
        width: f64,
        window_color: String,
        license_plate_color: String,
        license_plate_type: LicensePlateType,
        front_lights_color: String,
        tail_lights_color: String,
        tire_color: String,
        wheel_hubcap_color: String,
    }
}

impl DefaultOptions for CarOptions {
    type Version = CarBuilderVersion;

    fn default_options(version: CarBuilderVersion) -> Self {
        match version {
            CarBuilderVersion::V1 => Self {
                version,
                random: SharedRandom::default(),
                max_hood_offset: 1.0,
                max_back_seat_offset: 1.0,
                light_size: 1.0,
                global_color_multiplier: 1.0,
                body_color: None,
                body_color_multiplier: 0.6,
                color_emission: 0.15,
                width: 1.0,
                window_color: "#D6F0FF".to_string(),
                license_plate_color: "#FFFFFF".to_string(),
                license_plate_type: LicensePlateType::EU,
                front_lights_color: "#FFEA84".to_string(),
                tail_lights_color: "#FF3838".to_string(),
                tire_color: "#4D4D4B".to_string(),
                wheel_hubcap_color: "#E0E0DB".to_string(),
            },
        }
    }
}

/// Creates a car from partial options.
///
/// Parts whose tag is in `excluded` stay standalone children of the
/// returned root. The body, skin and glazing are always merged.
pub fn create_car(
    name: &str,
    scene: &mut Scene,
    options: PartialCarOptions,
    excluded: &[CarPart],
) -> Result<Node, BuildError> {
    build_car(name, scene, &options.resolve(), excluded)
}

/// Creates a car from complete options.
///
/// # Errors
///
/// [`BuildError::InvalidColor`] for a malformed color string.
pub fn build_car(
    name: &str,
    scene: &mut Scene,
    options: &CarOptions,
    excluded: &[CarPart],
) -> Result<Node, BuildError> {
    let random = &options.random;
    let width = options.width;

    let proportions = Proportions::draw(random, options.max_hood_offset, options.max_back_seat_offset);
    let silhouette = Silhouette::new(&proportions);
    let windows = cut_windows(&silhouette.points, silhouette.window_width(), random.next());
    let materials = CarMaterials::new(name, scene, options)?;

    let mut parts: Vec<Part<CarPart>> = Vec::new();

    // Body
    let mut skin = Solid::new("skin", silhouette.skin(width), materials.body.clone());
    skin.transform.rotation.x = -FRAC_PI_2;

    let panel = extrude_flat(&silhouette.points, &windows.holes())?;
    let (left_panel, right_panel) = side_pair("body", panel, width, &materials.body);

    let (windshield_frame, windshield) = pane(
        "windshield",
        windows.windshield_length,
        windows.frame / 2.0,
        &windows,
        width,
        &materials,
    )?;
    let (rear_frame, rear_window) = pane(
        "rear_window",
        windows.rear_window_length,
        windows.frame,
        &windows,
        width,
        &materials,
    )?;
    let windshield_base = stand_up(flat(silhouette.points[2]));
    let rear_base = stand_up(flat(silhouette.points[4]));
    let mut glazing = Vec::with_capacity(4);
    for (mut solid, base, angle) in [
        (windshield_frame, windshield_base, windows.windshield_angle),
        (windshield, windshield_base, windows.windshield_angle),
        (rear_frame, rear_base, windows.rear_window_angle),
        (rear_window, rear_base, windows.rear_window_angle),
    ] {
        solid.transform.position = base;
        solid.transform.rotation.z = angle;
        glazing.push(solid);
    }

    parts.push(Part::fixed(skin));
    parts.push(Part::fixed(left_panel));
    parts.push(Part::fixed(right_panel));
    parts.extend(glazing.into_iter().map(Part::fixed));

    for (k, cutout) in windows.holes().iter().enumerate() {
        let glass = extrude_flat(cutout, &[])?;
        let (left, right) = side_pair(&format!("side_window_{}", k + 1), glass, width, &materials.window);
        parts.push(Part::fixed(left));
        parts.push(Part::fixed(right));
    }

    // Wheels
    let wheel_size = silhouette.wheel_size;
    let wheel = build_wheel(
        "front_wheel_left",
        scene,
        &WheelOptions {
            radius: wheel_size,
            depth: wheel_size,
            hubcap_size: HUBCAP_SIZE,
            quality: DEFAULT_WHEEL_QUALITY,
            tire_material: Some(materials.tire.clone()),
            hubcap_material: Some(materials.hubcap.clone()),
            ..WheelOptions::default()
        },
    )?;
    let wheel_offset = DVec3::new(0.0, wheel_size, -(width / 2.0 - wheel_size / 2.0));

    let mut front_left = wheel.clone();
    front_left.transform.position = stand_up(silhouette.front_axle) + wheel_offset;
    let front_right = front_left.mirrored("front_wheel_right", MirrorAxis::Z);

    let mut rear_left = wheel;
    rear_left.name = "rear_wheel_left".to_string();
    rear_left.transform.position = stand_up(silhouette.rear_axle) + wheel_offset;
    let rear_right = rear_left.mirrored("rear_wheel_right", MirrorAxis::Z);

    // Lights
    let light_size = options.light_size * LIGHT_RADIUS;
    let light_depth = light_size / 10.0;
    let lights = LightRig {
        size: light_size,
        depth: light_depth,
        width,
    };

    let head_sides = if random.next() < 0.5 {
        SQUARE_LIGHT_SIDES
    } else {
        SQUARE_LIGHT_SIDES + (random.next() * MAX_EXTRA_HEAD_LIGHT_SIDES).round() as u32
    };
    let head_left = lights.place(
        scene,
        "headlight_left",
        head_sides,
        &materials.head_light,
        silhouette.hood_head() - DVec3::new(light_depth, 0.0, 0.0),
        FRAC_PI_2,
        random,
    )?;
    let head_right = head_left.mirrored("headlight_right", MirrorAxis::Z);

    let tail_left = lights.place(
        scene,
        "tail_light_left",
        SQUARE_LIGHT_SIDES,
        &materials.tail_light,
        silhouette.trunk_head() + DVec3::new(light_depth, 0.0, 0.0),
        -FRAC_PI_2,
        random,
    )?;
    let tail_right = tail_left.mirrored("tail_light_right", MirrorAxis::Z);

    // License plates
    let plate = build_car_light(
        "license_plate_front",
        scene,
        &CarLightOptions {
            sides: SQUARE_LIGHT_SIDES,
            radius: PLATE_RADIUS,
            depth: light_depth,
            rotation: 0.0,
            material: Some(materials.plate.clone()),
            ..CarLightOptions::default()
        },
    )?;
    let plate_type = options.license_plate_type;
    let plate_scaling = DVec3::new(plate_type.size, plate_type.size / plate_type.ratio, 1.0);
    let plate_drop = silhouette.hood_length() - PLATE_RADIUS;

    let mut plate_front = plate.clone();
    plate_front.transform.rotation.y = FRAC_PI_2;
    plate_front.transform.position = silhouette.hood_head() + DVec3::new(-light_depth, -plate_drop, 0.0);
    plate_front.transform.scaling = plate_scaling;

    let mut plate_rear = plate;
    plate_rear.name = "license_plate_rear".to_string();
    plate_rear.transform.rotation.y = -FRAC_PI_2;
    plate_rear.transform.position = silhouette.trunk_head() + DVec3::new(light_depth, -plate_drop, 0.0);
    plate_rear.transform.scaling = plate_scaling;

    parts.extend([
        Part::tagged(CarPart::WheelFrontLeft, front_left),
        Part::tagged(CarPart::WheelFrontRight, front_right),
        Part::tagged(CarPart::WheelRearRight, rear_right),
        Part::tagged(CarPart::WheelRearLeft, rear_left),
        Part::tagged(CarPart::LightHeadLeft, head_left),
        Part::tagged(CarPart::LightHeadRight, head_right),
        Part::tagged(CarPart::LightTailRight, tail_right),
        Part::tagged(CarPart::LightTailLeft, tail_left),
        Part::tagged(CarPart::LicensePlateFront, plate_front),
        Part::tagged(CarPart::LicensePlateRear, plate_rear),
    ]);

    debug!(
        "car '{}': hood {:.3}, trunk {:.3}, wheel size {:.3}, {} head light sides",
        name, proportions.hood, proportions.trunk, wheel_size, head_sides
    );
    Ok(consolidate(name, parts, excluded))
}

fn flat(point: DVec3) -> DVec3 {
    DVec3::new(point.x, 0.0, point.z)
}

/// Flat polygon facing +Y from points in the XZ plane.
fn extrude_flat(outer: &[DVec3], holes: &[Vec<DVec3>]) -> Result<Mesh, BuildError> {
    let polygon = Polygon2D::from_xz(outer, holes);
    Ok(extrude_polygon(&polygon, &PolygonExtrudeParams::default())?)
}

/// Stands a flat outline-plane mesh up and places it on both car sides,
/// each copy facing outwards.
fn side_pair(name: &str, mesh: Mesh, width: f64, material: &MaterialRef) -> (Solid, Solid) {
    let mut left = Solid::new(format!("{}_left", name), mesh, material.clone());
    left.transform.rotation.x = -FRAC_PI_2;

    let mut right = left.clone();
    right.name = format!("{}_right", name);
    right.mesh.flip_faces();

    left.transform.position.z = -width / 2.0;
    right.transform.position.z = width / 2.0;
    (left, right)
}

/// A sloped pane: the body-colored frame with a hole and the glass filling
/// it. `lead` is the glass inset at the pane's base.
fn pane(
    name: &str,
    length: f64,
    lead: f64,
    windows: &WindowCutouts,
    width: f64,
    materials: &CarMaterials,
) -> Result<(Solid, Solid), BuildError> {
    let outline = pane_frame(length, width);
    let glass = pane_glass(length, width, windows.frame, lead);

    let frame_mesh = extrude_flat(&outline, &[glass.clone()])?;
    let glass_mesh = extrude_flat(&glass, &[])?;
    Ok((
        Solid::new(format!("{}_frame", name), frame_mesh, materials.body.clone()),
        Solid::new(name, glass_mesh, materials.window.clone()),
    ))
}

/// Shared measures of the head and tail lights.
struct LightRig {
    size: f64,
    depth: f64,
    width: f64,
}

impl LightRig {
    /// Builds a left-side light facing along `yaw` at `head`, then draws
    /// its half turn, drop, inset and (when square) stretch.
    #[allow(clippy::too_many_arguments)]
    fn place(
        &self,
        scene: &mut Scene,
        name: &str,
        sides: u32,
        material: &MaterialRef,
        head: DVec3,
        yaw: f64,
        random: &SharedRandom,
    ) -> Result<Solid, BuildError> {
        let rotation = if random.next() > 0.5 { PI } else { 0.0 };
        let mut light = build_car_light(
            name,
            scene,
            &CarLightOptions {
                sides,
                radius: self.size,
                depth: self.depth,
                rotation,
                material: Some(material.clone()),
                ..CarLightOptions::default()
            },
        )?;

        let drop = self.size * (1.0 + random.next());
        let inset = self.width / 2.0 - self.size * (1.0 + random.next());
        light.transform.rotation.y = yaw;
        light.transform.position = head + DVec3::new(0.0, -drop, -inset);

        if sides == SQUARE_LIGHT_SIDES {
            let stretch = 1.0 + random.next();
            light.transform.scaling.x = stretch;
            light.transform.position.z += 0.5 * (stretch * self.size - self.size);
        }
        Ok(light)
    }
}

/// Every material of one car, all frozen.
struct CarMaterials {
    body: MaterialRef,
    window: MaterialRef,
    tire: MaterialRef,
    hubcap: MaterialRef,
    head_light: MaterialRef,
    tail_light: MaterialRef,
    plate: MaterialRef,
}

impl CarMaterials {
    /// Draws the body color when none is configured.
    fn new(name: &str, scene: &mut Scene, options: &CarOptions) -> Result<Self, BuildError> {
        let global = options.global_color_multiplier;
        let emission = options.color_emission;

        let paint = |part: &str, hex: &str| -> Result<Material, BuildError> {
            let diffuse = Color3::from_hex(hex)? * global;
            Ok(Material::new(format!("{}_{}", name, part))
                .with_diffuse(diffuse)
                .with_emissive(diffuse * emission * global)
                .freeze())
        };

        let window = paint("window", &options.window_color)?;
        let tire = paint("tire", &options.tire_color)?.with_specular(Color3::BLACK);
        let hubcap = paint("hubcap", &options.wheel_hubcap_color)?;
        let head_light = paint("head_light", &options.front_lights_color)?;
        let tail_light = paint("tail_light", &options.tail_lights_color)?;
        let plate = paint("license_plate", &options.license_plate_color)?;

        let base = match &options.body_color {
            Some(hex) => Color3::from_hex(hex)?,
            None => Color3::random(&mut options.random.clone()),
        };
        let body_diffuse = base * options.body_color_multiplier * global;
        let body = Material::new(format!("{}_body", name))
            .with_diffuse(body_diffuse)
            .with_emissive(body_diffuse * emission)
            .freeze();

        Ok(Self {
            body: scene.add_material(body),
            window: scene.add_material(window),
            tire: scene.add_material(tire),
            hubcap: scene.add_material(hubcap),
            head_light: scene.add_material(head_light),
            tail_light: scene.add_material(tail_light),
            plate: scene.add_material(plate),
        })
    }
}
