//! The doctor directory, a registry parallel to the room schedules. Records
//! carry an opaque id, but identity for dedup and lookups is the exact
//! (name, specialty) pair.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::storage::JsonCollection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
}

pub struct DoctorDirectory {
    collection: JsonCollection<Doctor>,
}

impl DoctorDirectory {
    pub fn new(collection: JsonCollection<Doctor>) -> Self {
        DoctorDirectory { collection }
    }

    pub fn list(&self) -> Result<Vec<Doctor>> {
        self.collection.load()
    }

    /// Registers a doctor. Adding a pair that already exists is a no-op, so
    /// the directory never holds duplicates.
    pub fn add(&self, name: &str, specialty: &str) -> Result<()> {
        check_pair(name, specialty)?;
        let mut doctors = self.collection.load()?;
        if doctors
            .iter()
            .any(|d| d.name == name && d.specialty == specialty)
        {
            return Ok(());
        }
        doctors.push(Doctor {
            id: Uuid::new_v4(),
            name: name.to_string(),
            specialty: specialty.to_string(),
        });
        self.collection.save(&doctors)?;
        info!("directory: added {name} ({specialty})");
        Ok(())
    }

    /// Drops every record matching the pair. Removing a pair that is not
    /// present is not an error.
    pub fn remove(&self, name: &str, specialty: &str) -> Result<()> {
        check_pair(name, specialty)?;
        let mut doctors = self.collection.load()?;
        let before = doctors.len();
        doctors.retain(|d| !(d.name == name && d.specialty == specialty));
        if doctors.len() != before {
            self.collection.save(&doctors)?;
            info!("directory: removed {name} ({specialty})");
        }
        Ok(())
    }

    /// Renames a record in place; its id survives the edit. Renaming onto a
    /// pair another record already holds would break the no-duplicates rule
    /// and is rejected.
    pub fn update(
        &self,
        old_name: &str,
        old_specialty: &str,
        new_name: &str,
        new_specialty: &str,
    ) -> Result<Doctor> {
        check_pair(new_name, new_specialty)?;
        let mut doctors = self.collection.load()?;
        if doctors.iter().any(|d| {
            d.name == new_name
                && d.specialty == new_specialty
                && !(d.name == old_name && d.specialty == old_specialty)
        }) {
            return Err(Error::Conflict(format!(
                "doctor {new_name} ({new_specialty}) is already in the directory"
            )));
        }
        let Some(doctor) = doctors
            .iter_mut()
            .find(|d| d.name == old_name && d.specialty == old_specialty)
        else {
            return Err(Error::NotFound(format!(
                "doctor {old_name} ({old_specialty}) is not in the directory"
            )));
        };
        doctor.name = new_name.to_string();
        doctor.specialty = new_specialty.to_string();
        let updated = doctor.clone();
        self.collection.save(&doctors)?;
        info!("directory: renamed {old_name} ({old_specialty}) to {new_name} ({new_specialty})");
        Ok(updated)
    }

    /// Exact-pair lookup, used to cross-check schedule entries against the
    /// registry.
    pub fn find(&self, name: &str, specialty: &str) -> Result<Option<Doctor>> {
        let doctors = self.collection.load()?;
        Ok(doctors
            .into_iter()
            .find(|d| d.name == name && d.specialty == specialty))
    }
}

fn check_pair(name: &str, specialty: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::missing_field("name"));
    }
    if specialty.trim().is_empty() {
        return Err(Error::missing_field("specialty"));
    }
    Ok(())
}
