//! Perspective rectification of the camera frame to a top-down view.
//!
//! A trapezoid of known flat ground in the camera frame is mapped onto a small
//! square just above the bottom-centre of the output, which yields a fixed
//! pixels-per-meter scale. The mapping assumes flat ground and a camera rigidly
//! mounted to the body, so it only holds while the vehicle is level.

use image::{Rgb, RgbImage};
use nalgebra::{Matrix3, SMatrix, SVector, Vector3};

use crate::config::PerceptionConfig;
use crate::error::{PathikError, Result};

/// Homogeneous weights at or below this are treated as behind the camera.
const MIN_HOMOGENEOUS_W: f64 = 1e-9;

/// Solve the perspective transform mapping four `src` points onto four `dst`
/// points.
///
/// The result is scaled so the source points have a positive homogeneous
/// weight; points with a non-positive weight lie beyond the horizon.
///
/// Returns `None` when the point sets are degenerate.
pub fn perspective_transform(src: &[[f32; 2]; 4], dst: &[[f32; 2]; 4]) -> Option<Matrix3<f64>> {
    let mut a = SMatrix::<f64, 8, 8>::zeros();
    let mut b = SVector::<f64, 8>::zeros();

    for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
        let (x, y) = (s[0] as f64, s[1] as f64);
        let (u, v) = (d[0] as f64, d[1] as f64);
        let r = 2 * i;

        a[(r, 0)] = x;
        a[(r, 1)] = y;
        a[(r, 2)] = 1.0;
        a[(r, 6)] = -u * x;
        a[(r, 7)] = -u * y;
        b[r] = u;

        a[(r + 1, 3)] = x;
        a[(r + 1, 4)] = y;
        a[(r + 1, 5)] = 1.0;
        a[(r + 1, 6)] = -v * x;
        a[(r + 1, 7)] = -v * y;
        b[r + 1] = v;
    }

    let h = a.lu().solve(&b)?;
    if h.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let homography = Matrix3::new(
        h[0], h[1], h[2], //
        h[3], h[4], h[5], //
        h[6], h[7], 1.0,
    );
    let (x, y) = (src[0][0] as f64, src[0][1] as f64);
    let w = h[6] * x + h[7] * y + 1.0;
    if w.abs() <= MIN_HOMOGENEOUS_W {
        return None;
    }
    Some(if w < 0.0 { -homography } else { homography })
}

/// Calibrated perspective warp for one camera frame size.
#[derive(Clone, Debug)]
pub struct Rectifier {
    homography: Matrix3<f64>,
    inverse: Matrix3<f64>,
    width: u32,
    height: u32,
    fill: Rgb<u8>,
}

impl Rectifier {
    /// Build the rectifier from the calibration in `config`.
    pub fn new(config: &PerceptionConfig) -> Result<Self> {
        let dst = config.destination_points();
        let homography = perspective_transform(&config.source_points, &dst)
            .ok_or(PathikError::DegenerateCalibration)?;
        let inverse = homography
            .try_inverse()
            .ok_or(PathikError::DegenerateCalibration)?;

        Ok(Self {
            homography,
            inverse,
            width: config.frame_width,
            height: config.frame_height,
            fill: Rgb(config.border_color),
        })
    }

    /// Frame size the rectifier was calibrated for.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Map a camera-frame point into the rectified view.
    pub fn project(&self, point: [f64; 2]) -> Option<[f64; 2]> {
        apply(&self.homography, point[0], point[1]).map(|(x, y)| [x, y])
    }

    /// Warp a camera frame into the rectified top-down view.
    ///
    /// Output pixels with no camera coverage get the border fill colour.
    pub fn warp(&self, frame: &RgbImage) -> Result<RgbImage> {
        if frame.dimensions() != (self.width, self.height) {
            return Err(PathikError::FrameSize {
                expected: (self.width, self.height),
                actual: frame.dimensions(),
            });
        }

        let max_x = (self.width - 1) as f64;
        let max_y = (self.height - 1) as f64;

        Ok(RgbImage::from_fn(self.width, self.height, |x, y| {
            match apply(&self.inverse, x as f64, y as f64) {
                Some((sx, sy)) if (0.0..=max_x).contains(&sx) && (0.0..=max_y).contains(&sy) => {
                    sample_bilinear(frame, sx, sy)
                }
                _ => self.fill,
            }
        }))
    }
}

/// Apply a homography to a point; `None` if it lands behind the camera.
#[inline]
fn apply(h: &Matrix3<f64>, x: f64, y: f64) -> Option<(f64, f64)> {
    let p = h * Vector3::new(x, y, 1.0);
    if p.z <= MIN_HOMOGENEOUS_W {
        return None;
    }
    Some((p.x / p.z, p.y / p.z))
}

/// Bilinear sample; caller guarantees `(x, y)` is inside the image.
fn sample_bilinear(img: &RgbImage, x: f64, y: f64) -> Rgb<u8> {
    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(img.width() - 1);
    let y1 = (y0 + 1).min(img.height() - 1);
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = img.get_pixel(x0, y0).0;
    let p10 = img.get_pixel(x1, y0).0;
    let p01 = img.get_pixel(x0, y1).0;
    let p11 = img.get_pixel(x1, y1).0;

    let mut out = [0u8; 3];
    for c in 0..3 {
        let v = p00[c] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[c] as f64 * fx * (1.0 - fy)
            + p01[c] as f64 * (1.0 - fx) * fy
            + p11[c] as f64 * fx * fy;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    Rgb(out)
}
