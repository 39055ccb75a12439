#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One state of a two-polymer blend sweep.
pub struct Point {
    pub phi: f64,
    pub chi: f64,
    pub pressure: f64,
    pub f_helmholtz: f64,
}

impl Point {
    pub fn new(phi: f64, chi: f64, pressure: f64, f_helmholtz: f64) -> Self {
        Self {
            phi,
            chi,
            pressure,
            f_helmholtz,
        }
    }
}

// Floats go through `{:?}` so integral values keep their `.0` and parse back
// as floats.
pub fn state_text(p: &Point) -> String {
    format!(
        "System{{
  Mixture{{
    nMonomer  2
    monomers[
      1.0
      1.0
    ]
    nPolymer  2
    Polymer{{
      type    linear
      phi     {phi:?}
    }}
    Polymer{{
      type    linear
      phi     {rest:?}
    }}
    vMonomer  1.0
  }}
  Interaction{{
    chi(
      1   0   {chi:?}
    )
  }}
}}

fHelmholtz    {f:?}
pressure      {pressure:?}

polymers:
     species       phi               mu
         0    {phi:?}   3.2e+01
         1    {rest:?}   3.1e+01

cellParams:
       0    1.7e+00
",
        phi = p.phi,
        rest = 1.0 - p.phi,
        chi = p.chi,
        f = p.f_helmholtz,
        pressure = p.pressure,
    )
}

/// The phi / pressure sweep used throughout the tests.
pub fn blend_points() -> Vec<Point> {
    [
        (0.5, 12.0, 32.44, 1.925675),
        (0.55, 13.0, 30.68, 2.1102042),
        (0.6, 14.0, 28.83, 2.2716872),
        (0.65, 15.0, 26.80, 2.4158122),
        (0.7, 16.0, 24.52, 2.5464487),
    ]
    .into_iter()
    .map(|(phi, chi, pressure, f)| Point::new(phi, chi, pressure, f))
    .collect()
}

/// Write `points` as `<dir>/<i>.dat` and return the directory.
pub fn write_sweep(root: &Path, dir: &str, points: &[Point]) -> PathBuf {
    let out = root.join(dir);
    fs::create_dir_all(&out).unwrap();
    for (i, p) in points.iter().enumerate() {
        fs::write(out.join(format!("{i}.dat")), state_text(p)).unwrap();
    }
    out
}

/// Parameter file whose Sweep block points at `base_file_name`.
pub fn write_param(root: &Path, name: &str, base_file_name: &str) -> PathBuf {
    let path = root.join(name);
    fs::write(
        &path,
        format!(
            "System{{
  Mixture{{
    nMonomer  2
  }}
  Sweep{{
    ns            4
    baseFileName  {base_file_name}
  }}
}}
"
        ),
    )
    .unwrap();
    path
}

pub fn tempdir() -> TempDir {
    TempDir::new().unwrap()
}
