use shared_types::{Bar, Location};

pub const EARTH_RADIUS_MILES: f64 = 3958.8;
pub const EARTH_RADIUS_KM: f64 = 6371.0;

fn central_angle(a: Location, b: Location) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Great-circle distance in miles.
pub fn haversine_miles(a: Location, b: Location) -> f64 {
    EARTH_RADIUS_MILES * central_angle(a, b)
}

pub fn haversine_km(a: Location, b: Location) -> f64 {
    EARTH_RADIUS_KM * central_angle(a, b)
}

/// Where to center a map showing every bar: the mean of the bars'
/// positions as unit vectors, projected back to latitude/longitude.
pub fn geographic_center(bars: &[Bar]) -> Option<Location> {
    if bars.is_empty() {
        return None;
    }

    let (mut x_total, mut y_total, mut z_total) = (0.0, 0.0, 0.0);
    bars.iter().for_each(|bar| {
        let lat_rad = bar.location.lat.to_radians();
        let lng_rad = bar.location.lng.to_radians();

        x_total += lat_rad.cos() * lng_rad.cos();
        y_total += lat_rad.cos() * lng_rad.sin();
        z_total += lat_rad.sin();
    });

    let count = bars.len() as f64;
    let x_avg = x_total / count;
    let y_avg = y_total / count;
    let z_avg = z_total / count;

    let lng = y_avg.atan2(x_avg).to_degrees();
    let hyp = (x_avg.powi(2) + y_avg.powi(2)).sqrt();
    let lat = z_avg.atan2(hyp).to_degrees();

    Some(Location { lat, lng })
}

/// Bars ordered by distance from `origin`, nearest first. Equal distances
/// keep input order. `radius_miles` drops anything farther away.
pub fn nearest(bars: &[Bar], origin: Location, radius_miles: Option<f64>) -> Vec<(&Bar, f64)> {
    let mut found: Vec<(&Bar, f64)> = bars
        .iter()
        .map(|bar| (bar, haversine_miles(origin, bar.location)))
        .filter(|(_, distance)| radius_miles.map_or(true, |r| *distance <= r))
        .collect();

    found.sort_by(|a, b| a.1.total_cmp(&b.1));
    found
}
