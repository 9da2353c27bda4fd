//! Entry point for the Quimera math demo.
//! Builds world/view/projection matrices from CLI flags and prints the uniform payload.

use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};
use quimera_core::AngleNotation;
use quimera_math::camera::{Camera, Handedness};
use quimera_math::transform::Transform;
use quimera_math::{DepthRange, SpaceConversionMatrix, Transformable, Vec3, Vec4, vec3};

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct CameraUniform {
    mvp: [[f32; 4]; 4],
}

fn arg_value(prefix: &str) -> Option<String> {
    std::env::args()
        .filter_map(|arg| arg.strip_prefix(prefix).map(str::to_owned))
        .last()
}

fn parse_angle_notation_arg() -> AngleNotation {
    // --angles=deg|rad, default rad
    match arg_value("--angles=") {
        Some(val) => val.parse().unwrap_or_else(|err| {
            log::warn!("{}, falling back to radians.", err);
            AngleNotation::Radians
        }),
        None => AngleNotation::Radians,
    }
}

fn parse_handedness_arg() -> Handedness {
    match arg_value("--handedness=").as_deref().map(str::to_ascii_lowercase) {
        None => Handedness::Left,
        Some(val) => match val.as_str() {
            "lh" | "left" => Handedness::Left,
            "rh" | "right" => Handedness::Right,
            other => {
                log::warn!("Unknown handedness '{}', falling back to left.", other);
                Handedness::Left
            }
        },
    }
}

fn parse_depth_arg() -> DepthRange {
    match arg_value("--depth=").as_deref().map(str::to_ascii_lowercase) {
        None => DepthRange::ZERO_TO_ONE,
        Some(val) => match val.as_str() {
            "zero-one" | "01" | "d3d" | "vulkan" => DepthRange::ZERO_TO_ONE,
            "minus-one-one" | "gl" | "opengl" => DepthRange::MINUS_ONE_TO_ONE,
            other => {
                log::warn!("Unknown depth range '{}', falling back to [0, 1].", other);
                DepthRange::ZERO_TO_ONE
            }
        },
    }
}

fn parse_f32_arg(prefix: &str, default: f32) -> f32 {
    match arg_value(prefix) {
        Some(v) => v.parse::<f32>().unwrap_or_else(|_| {
            log::warn!("Ignoring malformed {}{}, using {}.", prefix, v, default);
            default
        }),
        None => default,
    }
}

fn parse_vec3_arg(prefix: &str, default: Vec3) -> Result<Vec3> {
    let Some(v) = arg_value(prefix) else {
        return Ok(default);
    };
    let parts = v
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Malformed vector {}{}", prefix, v))?;
    match parts.as_slice() {
        [x, y, z] => Ok(vec3(*x, *y, *z)),
        _ => anyhow::bail!("Expected three components in {}{}", prefix, v),
    }
}

fn parse_size_args() -> (u32, u32) {
    let mut w: Option<u32> = None;
    let mut h: Option<u32> = None;

    if let Some(v) = arg_value("--size=") {
        if let Some((sw, sh)) = v.split_once('x').or_else(|| v.split_once('X')) {
            if let (Ok(pw), Ok(ph)) = (sw.parse::<u32>(), sh.parse::<u32>()) {
                w = Some(pw);
                h = Some(ph);
            }
        }
    }

    let ww = w.unwrap_or(1280).max(1);
    let hh = h.unwrap_or(720).max(1);
    (ww, hh)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let notation = parse_angle_notation_arg();
    let handedness = parse_handedness_arg();
    let depth = parse_depth_arg();
    let (width, height) = parse_size_args();
    let fov = notation.to_radians(parse_f32_arg("--fov=", notation.from_radians(1.0)));
    let near = parse_f32_arg("--near=", 0.1);
    let far = parse_f32_arg("--far=", 100.0);
    let eye = parse_vec3_arg("--eye=", vec3(0.0, 2.0, -6.0))?;
    let target = parse_vec3_arg("--target=", Vec3::ZERO)?;
    let rotation = parse_vec3_arg("--rotation=", Vec3::ZERO)?;
    log::info!(
        "Starting Quimera. angles={:?}, handedness={:?}, depth={:?}, viewport={}x{}",
        notation,
        handedness,
        depth,
        width,
        height
    );

    let camera = Camera::new_perspective(
        eye,
        target,
        Vec3::Y,
        fov,
        near,
        far,
        width as f32 / height as f32,
    )
    .with_handedness(handedness)
    .with_depth_range(depth);

    let model = Transform::from_euler(Vec3::ZERO, rotation, Vec3::ONE, notation);
    let mut world = model.world_matrix();
    if handedness == Handedness::Right {
        world = world.switch_hand_convention_world_space_matrix();
    }

    let view_proj = camera
        .view_proj()
        .context("Failed to build camera matrices")?;
    let mvp: SpaceConversionMatrix = world * view_proj;
    log::info!("World:\n{}", format_rows(&world));
    log::info!("View * Projection:\n{}", format_rows(&view_proj));

    // Unit cube corners through the full pipeline.
    for corner in [-0.5f32, 0.5]
        .into_iter()
        .flat_map(|x| [-0.5f32, 0.5].into_iter().map(move |y| (x, y)))
        .flat_map(|(x, y)| [-0.5f32, 0.5].into_iter().map(move |z| Vec4::new(x, y, z, 1.0)))
    {
        let clip = corner.transformed_by(&mvp);
        let ndc = clip.truncate() / clip.w;
        log::info!("{:?} -> clip {:?}, ndc {:?}", corner.truncate(), clip, ndc);
    }

    let uniform = CameraUniform { mvp: mvp.ij };
    let bytes = bytemuck::bytes_of(&uniform);
    log::info!("Camera uniform: {} bytes", bytes.len());
    println!("{:02x?}", bytes);

    log::info!("Done.");
    Ok(())
}

fn format_rows(m: &SpaceConversionMatrix) -> String {
    m.ij.iter()
        .map(|r| format!("  [{:>10.5} {:>10.5} {:>10.5} {:>10.5}]", r[0], r[1], r[2], r[3]))
        .collect::<Vec<_>>()
        .join("\n")
}
