use geo::point;

use crate::crs::Crs;
use crate::scalar::Value;
use crate::table::GeoTable;

/// Divisional cities of Bangladesh, as points in WGS 84.
pub(crate) fn table() -> GeoTable {
    let city = [
        "Dhaka",
        "Barisal",
        "Chittagong",
        "Khulna",
        "Mymensingh",
        "Rajshahi",
        "Rangpur",
        "Sylhet",
    ];
    let population: [i64; 8] = [
        36433505, 8325666, 29145000, 15687759, 11370000, 18485858, 15787758, 9807000,
    ];
    let area = [
        20593.74, 13225.20, 33908.55, 22284.22, 10584.06, 18153.08, 16184.99, 12635.22,
    ];
    let latitude = [
        23.8101, 22.7010, 22.3569, 22.8456, 24.7471, 24.3745, 25.7439, 24.8949,
    ];
    let longitude = [
        90.4125, 90.3535, 91.7832, 89.5403, 90.4203, 88.6042, 89.2752, 91.8687,
    ];

    let float_column =
        |values: &[f64]| -> Vec<Value> { values.iter().map(|v| Value::from(*v)).collect() };
    GeoTable::try_from_xy(
        vec![
            ("city", city.iter().map(|v| Value::from(*v)).collect()),
            (
                "population",
                population.iter().map(|v| Value::from(*v)).collect(),
            ),
            ("area", float_column(&area)),
            ("latitude", float_column(&latitude)),
            ("longitude", float_column(&longitude)),
        ],
        &longitude,
        &latitude,
    )
    .unwrap()
    .with_crs(Crs::from_epsg(4326))
}

/// `[{city: "A", population: 10}, {city: "B", population: 30}]` at `(0, 0)` and `(1, 1)`.
pub(crate) fn two_city_table() -> GeoTable {
    GeoTable::try_from_columns(
        vec![
            ("city", vec![Value::from("A"), Value::from("B")]),
            ("population", vec![Value::from(10), Value::from(30)]),
        ],
        vec![point!(x: 0., y: 0.).into(), point!(x: 1., y: 1.).into()],
    )
    .unwrap()
}
