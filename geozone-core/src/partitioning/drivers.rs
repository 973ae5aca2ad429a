#[cfg(test)]
#[path = "../../tests/unit/partitioning/drivers_test.rs"]
mod drivers_test;

use crate::models::PipelineError;

/// An immutable mapping from truck label to driver display name. Relabeling never changes which
/// points share a truck.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverRoster {
    names: Vec<String>,
}

impl DriverRoster {
    /// Creates a roster with exactly one name per truck. Blank names fall back to default truck name.
    pub fn new(names: &[String], trucks: usize) -> Result<Self, PipelineError> {
        if names.len() != trucks {
            return Err(PipelineError::DriverRosterMismatch { drivers: names.len(), trucks });
        }

        let names = names
            .iter()
            .enumerate()
            .map(|(truck, name)| match name.trim() {
                "" => get_default_name(truck),
                name => name.to_string(),
            })
            .collect();

        Ok(Self { names })
    }

    /// Creates a roster where every truck is named by its number.
    pub fn anonymous(trucks: usize) -> Self {
        Self { names: (0..trucks).map(get_default_name).collect() }
    }

    /// Returns driver name for the truck label.
    pub fn name(&self, truck: usize) -> Option<&str> {
        self.names.get(truck).map(String::as_str)
    }

    /// Returns amount of trucks.
    pub fn size(&self) -> usize {
        self.names.len()
    }
}

fn get_default_name(truck: usize) -> String {
    format!("Truck {}", truck + 1)
}
