//! Design Fixtures

use serde::Deserialize;

use crate::designs::DesignRecord;

/// Designs file
#[derive(Debug, Default, Deserialize)]
pub struct DesignsFixture {
    /// Designs in catalogue order
    #[serde(default)]
    pub designs: Vec<DesignRecord>,
}
