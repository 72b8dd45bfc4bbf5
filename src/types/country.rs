/// A country as stored, with the optional economic figures attached to it.
///
/// `gdp` and `population` are nullable in the store; a country imported
/// without them still aggregates normally.
#[derive(Clone, Debug, PartialEq)]
pub struct Country {
    pub id: i64,
    pub name: String,
    pub gdp: Option<f64>,
    pub population: Option<i64>,
}
