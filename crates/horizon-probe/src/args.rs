//! Probe command-line arguments.

use clap::Parser;
use glam::DVec3;
use horizon_config::CliArgs;
use horizon_cull::BoundingSphere;

/// Query horizon visibility against an ellipsoidal body.
#[derive(Parser, Debug)]
#[command(name = "horizon-probe", about = "Query horizon visibility against an ellipsoid")]
pub struct ProbeArgs {
    #[command(flatten)]
    pub common: CliArgs,

    /// Eye position `x,y,z` in body-centered meters. Defaults to the
    /// configured probe altitude above the equator on +X.
    #[arg(long, value_parser = parse_dvec3)]
    pub eye: Option<DVec3>,

    /// Target `x,y,z` or bounding sphere `x,y,z,radius` to test. Repeatable.
    #[arg(long = "target", value_parser = parse_target)]
    pub targets: Vec<BoundingSphere>,

    /// Cull a synthetic patch hierarchy from several views in parallel.
    #[arg(long)]
    pub scene: bool,
}

fn parse_components(s: &str) -> Result<Vec<f64>, String> {
    s.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid number '{}': {e}", part.trim()))
        })
        .collect()
}

/// Parse `x,y,z`.
pub fn parse_dvec3(s: &str) -> Result<DVec3, String> {
    match parse_components(s)?.as_slice() {
        [x, y, z] => Ok(DVec3::new(*x, *y, *z)),
        other => Err(format!("expected 3 components, got {}", other.len())),
    }
}

/// Parse `x,y,z` (radius 0) or `x,y,z,radius`.
pub fn parse_target(s: &str) -> Result<BoundingSphere, String> {
    match parse_components(s)?.as_slice() {
        [x, y, z] => Ok(BoundingSphere::new(DVec3::new(*x, *y, *z), 0.0)),
        [x, y, z, r] if *r >= 0.0 => Ok(BoundingSphere::new(DVec3::new(*x, *y, *z), *r)),
        [_, _, _, r] => Err(format!("radius must be non-negative, got {r}")),
        other => Err(format!("expected 3 or 4 components, got {}", other.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dvec3() {
        assert_eq!(parse_dvec3("1, 2.5,-3"), Ok(DVec3::new(1.0, 2.5, -3.0)));
        assert!(parse_dvec3("1,2").is_err());
        assert!(parse_dvec3("1,x,3").is_err());
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(
            parse_target("1,0,0").unwrap(),
            BoundingSphere::new(DVec3::X, 0.0)
        );
        assert_eq!(
            parse_target("0,0,1,0.5").unwrap(),
            BoundingSphere::new(DVec3::Z, 0.5)
        );
        assert!(parse_target("0,0,1,-1").is_err());
        assert!(parse_target("0,0,1,2,3").is_err());
    }

    #[test]
    fn test_probe_args_with_common_flags() {
        let args = ProbeArgs::try_parse_from([
            "horizon-probe",
            "--equatorial-radius",
            "2",
            "--polar-radius",
            "1",
            "--eye",
            "4,0,0",
            "--target",
            "0,0,1",
            "--target",
            "4,0,0,0.1",
            "--scene",
        ])
        .unwrap();
        assert_eq!(args.common.equatorial_radius, Some(2.0));
        assert_eq!(args.common.polar_radius, Some(1.0));
        assert_eq!(args.eye, Some(DVec3::new(4.0, 0.0, 0.0)));
        assert_eq!(args.targets.len(), 2);
        assert!(args.scene);
    }
}
