pub mod laser_power;
pub mod mass_window;
pub mod records;
pub mod spectrum;

pub use laser_power::{
    LaserPowerEntry,
    PowerLookup,
    PowerTable,
};
pub use mass_window::{
    MassWindow,
    parse_window_list,
};
pub use records::{
    Efficiency,
    IntegrationResult,
    RawSpectraTable,
    ResultTable,
    WavelengthRecord,
};
pub use spectrum::Spectrum;
