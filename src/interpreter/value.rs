/// The runtime value type.
///
/// Defines `Value` together with the conversions every operator relies on:
/// the string form, the lenient numeric reading, truthiness and the JSON
/// rendering of lists and maps.
pub mod core;
