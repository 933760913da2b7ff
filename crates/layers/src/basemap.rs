use foundation::math::Vec2;

/// Default basemap resolution (equirectangular, 2:1).
pub const BASEMAP_WIDTH: u32 = 2048;
pub const BASEMAP_HEIGHT: u32 = 1024;

const OCEAN_TOP: [u8; 4] = [12, 28, 52, 255];
const OCEAN_BOTTOM: [u8; 4] = [4, 12, 28, 255];
const GRID: [u8; 4] = [96, 118, 150, 36];
const LAND: [u8; 4] = [62, 98, 72, 190];

/// Degrees between graticule lines.
const GRID_STEP_DEG: i32 = 30;

/// Samples per smoothed outline segment.
const CURVE_STEPS: usize = 12;

#[derive(Debug, thiserror::Error)]
pub enum BasemapError {
    #[error("cannot rasterize into a zero-area target ({width}x{height})")]
    ZeroArea { width: u32, height: u32 },
}

/// Owned RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    fn put(&mut self, x: u32, y: u32, color: [u8; 4]) {
        let i = ((y * self.width + x) * 4) as usize;
        self.pixels[i..i + 4].copy_from_slice(&color);
    }

    /// Source-over blend, bounds-checked.
    fn blend(&mut self, x: i64, y: i64, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let i = ((y as u32 * self.width + x as u32) * 4) as usize;
        let a = u16::from(color[3]);
        for c in 0..3 {
            let src = u16::from(color[c]);
            let dst = u16::from(self.pixels[i + c]);
            self.pixels[i + c] = ((src * a + dst * (255 - a)) / 255) as u8;
        }
        self.pixels[i + 3] = 255;
    }
}

/// Synthesizes the sphere's surface raster: ocean gradient, sparse
/// graticule, and hand-authored landmass silhouettes smoothed into closed
/// curves with translucent fill.
///
/// Runs once at engine init and is cached for the engine's lifetime. A
/// zero-area target is the fatal no-rasterization-context condition.
pub fn synthesize(width: u32, height: u32) -> Result<Raster, BasemapError> {
    if width == 0 || height == 0 {
        return Err(BasemapError::ZeroArea { width, height });
    }

    let mut raster = Raster::new(width, height);

    // Ocean gradient, light at the top of the map.
    for y in 0..height {
        let t = if height > 1 {
            f64::from(y) / f64::from(height - 1)
        } else {
            0.0
        };
        let mut row = [0u8; 4];
        for c in 0..4 {
            let top = f64::from(OCEAN_TOP[c]);
            let bottom = f64::from(OCEAN_BOTTOM[c]);
            row[c] = (top + (bottom - top) * t).round() as u8;
        }
        for x in 0..width {
            raster.put(x, y, row);
        }
    }

    draw_graticule(&mut raster);

    for outline in LANDMASSES {
        let px: Vec<Vec2> = outline
            .iter()
            .map(|&(lat, lng)| to_pixel(lat, lng, width, height))
            .collect();
        let smoothed = smooth_closed(&px, CURVE_STEPS);
        fill_polygon(&mut raster, &smoothed, LAND);
    }

    Ok(raster)
}

fn to_pixel(lat: f64, lng: f64, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        (lng + 180.0) / 360.0 * f64::from(width),
        (90.0 - lat) / 180.0 * f64::from(height),
    )
}

fn draw_graticule(raster: &mut Raster) {
    let width = raster.width();
    let height = raster.height();

    let mut lng = -180 + GRID_STEP_DEG;
    while lng < 180 {
        let x = ((f64::from(lng) + 180.0) / 360.0 * f64::from(width)).round() as i64;
        for y in 0..height {
            raster.blend(x, i64::from(y), GRID);
        }
        lng += GRID_STEP_DEG;
    }

    let mut lat = -90 + GRID_STEP_DEG;
    while lat < 90 {
        let y = ((90.0 - f64::from(lat)) / 180.0 * f64::from(height)).round() as i64;
        for x in 0..width {
            raster.blend(i64::from(x), y, GRID);
        }
        lat += GRID_STEP_DEG;
    }
}

/// Closed-curve smoothing via quadratic interpolation: each authored point
/// becomes a Bezier control point between the midpoints of its neighboring
/// segments, matching the usual midpoint quadratic-curve idiom.
fn smooth_closed(points: &[Vec2], steps: usize) -> Vec<Vec2> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity(n * steps);
    for i in 0..n {
        let control = points[(i + 1) % n];
        let from = points[i].lerp(control, 0.5);
        let to = control.lerp(points[(i + 2) % n], 0.5);
        for s in 0..steps {
            let t = s as f64 / steps as f64;
            let u = 1.0 - t;
            let x = u * u * from.x + 2.0 * u * t * control.x + t * t * to.x;
            let y = u * u * from.y + 2.0 * u * t * control.y + t * t * to.y;
            out.push(Vec2::new(x, y));
        }
    }
    out
}

/// Even-odd scanline fill with translucent blending.
fn fill_polygon(raster: &mut Raster, polygon: &[Vec2], color: [u8; 4]) {
    if polygon.len() < 3 {
        return;
    }

    let y_min = polygon.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let y_max = polygon
        .iter()
        .map(|p| p.y)
        .fold(f64::NEG_INFINITY, f64::max);
    let y_start = y_min.floor().max(0.0) as i64;
    let y_end = (y_max.ceil() as i64).min(i64::from(raster.height()) - 1);

    let mut crossings: Vec<f64> = Vec::new();
    for y in y_start..=y_end {
        let yc = y as f64 + 0.5;
        crossings.clear();

        for i in 0..polygon.len() {
            let p1 = polygon[i];
            let p2 = polygon[(i + 1) % polygon.len()];
            if (p1.y <= yc && p2.y > yc) || (p2.y <= yc && p1.y > yc) {
                let x = p1.x + (yc - p1.y) * (p2.x - p1.x) / (p2.y - p1.y);
                crossings.push(x);
            }
        }

        crossings.sort_by(f64::total_cmp);
        for pair in crossings.chunks_exact(2) {
            let x0 = pair[0].round() as i64;
            let x1 = pair[1].round() as i64;
            for x in x0..x1 {
                raster.blend(x, y, color);
            }
        }
    }
}

/// Hand-authored coarse landmass outlines, ordered (lat, lng) rings.
/// These are stylized silhouettes, not survey data.
const LANDMASSES: &[&[(f64, f64)]] = &[
    // North America
    &[
        (70.0, -160.0),
        (72.0, -120.0),
        (66.0, -90.0),
        (58.0, -72.0),
        (48.0, -58.0),
        (44.0, -70.0),
        (34.0, -77.0),
        (26.0, -81.0),
        (22.0, -98.0),
        (30.0, -114.0),
        (40.0, -124.0),
        (52.0, -131.0),
        (60.0, -148.0),
    ],
    // South America
    &[
        (10.0, -75.0),
        (6.0, -52.0),
        (-4.0, -36.0),
        (-24.0, -41.0),
        (-39.0, -60.0),
        (-54.0, -68.0),
        (-42.0, -74.0),
        (-18.0, -71.0),
        (-4.0, -81.0),
        (7.0, -79.0),
    ],
    // Africa
    &[
        (35.0, -7.0),
        (33.0, 11.0),
        (31.0, 32.0),
        (12.0, 44.0),
        (-2.0, 41.0),
        (-26.0, 33.0),
        (-35.0, 20.0),
        (-17.0, 12.0),
        (4.0, 9.0),
        (5.0, -8.0),
        (15.0, -17.0),
        (27.0, -13.0),
    ],
    // Eurasia
    &[
        (43.0, -9.0),
        (58.0, 5.0),
        (70.0, 25.0),
        (76.0, 60.0),
        (72.0, 100.0),
        (68.0, 140.0),
        (64.0, 170.0),
        (56.0, 160.0),
        (48.0, 140.0),
        (34.0, 121.0),
        (20.0, 106.0),
        (9.0, 100.0),
        (15.0, 80.0),
        (24.0, 64.0),
        (28.0, 50.0),
        (36.0, 34.0),
        (38.0, 15.0),
        (36.0, -2.0),
    ],
    // Australia
    &[
        (-12.0, 131.0),
        (-11.0, 142.5),
        (-25.0, 153.0),
        (-38.0, 147.0),
        (-35.0, 136.0),
        (-32.0, 115.5),
        (-21.0, 114.0),
    ],
    // Greenland
    &[
        (83.0, -35.0),
        (78.0, -20.0),
        (70.0, -23.0),
        (60.0, -43.0),
        (68.0, -52.0),
        (76.0, -60.0),
    ],
];
