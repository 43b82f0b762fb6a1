//! Horizon probe: point/sphere visibility queries and a parallel scene cull
//! against a configurable ellipsoid.

mod args;
mod error;
mod scene;

use std::process::ExitCode;
use std::thread;

use clap::Parser;
use glam::{DQuat, DVec3};
use horizon_config::Config;
use horizon_cull::{BoundingSphere, Ellipsoid, HorizonCullGate, HorizonTest};
use tracing::{info, warn};

use crate::args::ProbeArgs;
use crate::error::ProbeError;
use crate::scene::{CullStats, build_planet, cull_scene};

fn main() -> ExitCode {
    let args = ProbeArgs::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}, using defaults");
            let mut config = Config::default();
            config.apply_cli_overrides(&args.common);
            config
        }
    };

    let log_dir = args.common.config_dir().ok().map(|dir| dir.join("logs"));
    horizon_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &ProbeArgs) -> Result<Config, ProbeError> {
    let config_dir = args.common.config_dir()?;
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(&args.common);
    Ok(config)
}

fn run(args: &ProbeArgs, config: &Config) -> Result<(), ProbeError> {
    let ellipsoid = Ellipsoid::new(
        config.ellipsoid.radius_equator_m,
        config.ellipsoid.radius_polar_m,
    )?;
    info!(
        radius_equator = ellipsoid.radius_equator(),
        radius_polar = ellipsoid.radius_polar(),
        "Configured ellipsoid"
    );

    let template = HorizonTest::new(&ellipsoid);
    let eye = args.eye.unwrap_or_else(|| {
        DVec3::new(
            ellipsoid.radius_equator() + config.probe.eye_altitude_m,
            0.0,
            0.0,
        )
    });

    report_targets(&template, eye, &args.targets, config.culling.emit_clip_plane);

    if args.scene {
        let mut gate = HorizonCullGate::with_horizon(template);
        gate.set_enabled(config.culling.horizon_culling);
        run_scene(&gate, &ellipsoid, config)?;
    }

    Ok(())
}

fn report_targets(
    template: &HorizonTest,
    eye: DVec3,
    targets: &[BoundingSphere],
    emit_plane: bool,
) {
    let horizon = template.with_eye(eye);
    println!("eye {eye}");

    if horizon.is_degenerate() {
        warn!(%eye, "Eye is inside the ellipsoid; every target is reported visible");
    } else {
        println!("horizon distance {:.3}", horizon.horizon_distance());
    }

    if emit_plane {
        match horizon.plane() {
            Some(plane) => println!("clip plane {}", plane.as_dvec4()),
            None => println!("clip plane unavailable (eye at body center)"),
        }
    }

    for target in targets {
        let verdict = match horizon.try_is_visible(target.center, target.radius) {
            Ok(true) => "visible".to_string(),
            Ok(false) => "hidden".to_string(),
            Err(e) => format!("visible (indeterminate: {e})"),
        };
        println!("target {} r={} {verdict}", target.center, target.radius);
    }
}

fn run_scene(
    gate: &HorizonCullGate,
    ellipsoid: &Ellipsoid,
    config: &Config,
) -> Result<(), ProbeError> {
    let probe = &config.probe;
    let planet = build_planet(ellipsoid, probe.grid_resolution, probe.patch_radius_m);
    let total = planet.leaf_count();
    info!(
        patches = total,
        views = probe.views,
        enabled = gate.is_enabled(),
        "Culling synthetic planet"
    );

    let views = probe.views.max(1) as usize;
    let altitude = ellipsoid.radius_equator() + probe.eye_altitude_m;
    let eyes: Vec<DVec3> = (0..views)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / views as f64;
            DQuat::from_rotation_z(angle) * DVec3::new(altitude, 0.0, 0.0)
        })
        .collect();

    let results: Vec<Result<CullStats, ProbeError>> = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(eyes.len());
        for (index, &eye) in eyes.iter().enumerate() {
            let planet = &planet;
            let handle = thread::Builder::new()
                .name(format!("cull-view-{index}"))
                .spawn_scoped(scope, move || cull_scene(gate, planet, eye))
                .map_err(ProbeError::Spawn)?;
            handles.push(handle);
        }
        Ok::<_, ProbeError>(
            handles
                .into_iter()
                .enumerate()
                .map(|(index, handle)| {
                    handle.join().map_err(|_| ProbeError::WorkerPanicked(index))
                })
                .collect(),
        )
    })?;

    for (index, (eye, result)) in eyes.iter().zip(results).enumerate() {
        let stats = result?;
        println!(
            "view {index} eye {eye}: {}/{total} patches visible, {} of {} visits culled",
            stats.visible_leaves, stats.culled, stats.visited
        );
    }

    Ok(())
}
