//! Physical constants and unit conversions shared by the ECSA and mass
//! activity reductions.
//!
//! Unit contract: raw current in A, potential in V, time in s, electrode
//! area in cm^2, catalyst loading in mg/cm^2. Current densities are carried
//! in mA/cm^2.

/// Charge to oxidize one monolayer of adsorbed hydrogen on Pt, C/cm^2_Pt
pub const HUPD_CHARGE_DENSITY: f64 = 210e-6;

/// Potential at which mass activity is reported, V
pub const REFERENCE_VOLTAGE: f64 = 0.9;

/// mA per A
pub const MILLI: f64 = 1000.0;

/// cm^2 per m^2
pub const CM2_PER_M2: f64 = 10_000.0;

/// Platinum mass in grams for a loading (mg/cm^2) over an area (cm^2)
pub fn platinum_mass_g(loading_mg_cm2: f64, area_cm2: f64) -> f64 {
    loading_mg_cm2 * area_cm2 / MILLI
}

/// Hydrogen charge (mA*s/cm^2) to Pt area per geometric area (cm^2_Pt/cm^2)
pub fn charge_to_roughness(charge_ma_s_cm2: f64) -> f64 {
    charge_ma_s_cm2 / (MILLI * HUPD_CHARGE_DENSITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platinum_mass() {
        let g = platinum_mass_g(0.253, 50.0);
        assert!((g - 0.01265).abs() < 1e-12);
    }

    #[test]
    fn test_monolayer_charge_is_unit_roughness() {
        // 0.21 mA*s/cm2 == 210 uC/cm2
        assert!((charge_to_roughness(0.21) - 1.0).abs() < 1e-12);
    }
}
