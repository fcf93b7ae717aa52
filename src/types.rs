//! Domain enumerations backing the workbook's dropdown lists.
//!
//! The label strings are load-bearing: the generated formulas compare cell
//! text against them (e.g. the per-diem guard on the unpaid-student role),
//! so the dropdown lists and the formula builders must agree exactly.

/// Participant roles on the Staff & Participants sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Scientific staff (WiMi) - receives per-diems
    Staff,
    /// Lab assistant (VA) - receives per-diems
    LabAssistant,
    /// Hiwi (student assistant) - receives per-diems and hourly wages
    StudentAssistant,
    /// Unpaid graduating student - overnights only, no per-diem, no wages
    UnpaidStudent,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Staff,
        Role::LabAssistant,
        Role::StudentAssistant,
        Role::UnpaidStudent,
    ];

    /// Dropdown label, as compared against by the generated formulas
    pub fn label(&self) -> &'static str {
        match self {
            Role::Staff => "Staff (WiMi)",
            Role::LabAssistant => "Lab assistant (VA)",
            Role::StudentAssistant => "Hiwi (student assistant)",
            Role::UnpaidStudent => "Student (unpaid)",
        }
    }

    /// Unpaid students get overnights only
    pub fn receives_per_diem(&self) -> bool {
        !matches!(self, Role::UnpaidStudent)
    }

    /// Only the student-assistant role is compensated by logged hours
    pub fn is_hourly_paid(&self) -> bool {
        matches!(self, Role::StudentAssistant)
    }

    pub fn dropdown_labels() -> Vec<&'static str> {
        Self::ALL.iter().map(Role::label).collect()
    }
}

/// Transport types on the Travel & Vehicles sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportType {
    Train,
    Flight,
    Rental,
    Private,
    Taxi,
    PublicTransport,
    Other,
}

impl TransportType {
    pub const ALL: [TransportType; 7] = [
        TransportType::Train,
        TransportType::Flight,
        TransportType::Rental,
        TransportType::Private,
        TransportType::Taxi,
        TransportType::PublicTransport,
        TransportType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TransportType::Train => "Train",
            TransportType::Flight => "Flight",
            TransportType::Rental => "Rental",
            TransportType::Private => "Private",
            TransportType::Taxi => "Taxi",
            TransportType::PublicTransport => "Public Transport",
            TransportType::Other => "Other",
        }
    }

    pub fn dropdown_labels() -> Vec<&'static str> {
        Self::ALL.iter().map(TransportType::label).collect()
    }
}

/// Expense categories on the Material Expenses sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialCategory {
    Consumables,
    Equipment,
    Shipping,
    Permits,
    Other,
}

impl MaterialCategory {
    pub const ALL: [MaterialCategory; 5] = [
        MaterialCategory::Consumables,
        MaterialCategory::Equipment,
        MaterialCategory::Shipping,
        MaterialCategory::Permits,
        MaterialCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MaterialCategory::Consumables => "Consumables",
            MaterialCategory::Equipment => "Equipment",
            MaterialCategory::Shipping => "Shipping",
            MaterialCategory::Permits => "Permits",
            MaterialCategory::Other => "Other",
        }
    }

    pub fn dropdown_labels() -> Vec<&'static str> {
        Self::ALL.iter().map(MaterialCategory::label).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_unpaid_students_excluded_from_per_diem() {
        for role in Role::ALL {
            assert_eq!(role.receives_per_diem(), role != Role::UnpaidStudent);
        }
    }

    #[test]
    fn test_only_student_assistants_are_hourly_paid() {
        for role in Role::ALL {
            assert_eq!(role.is_hourly_paid(), role == Role::StudentAssistant);
        }
    }

    #[test]
    fn test_dropdown_labels_are_unique() {
        let labels = Role::dropdown_labels();
        for (i, a) in labels.iter().enumerate() {
            for b in &labels[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_transport_dropdown_has_seven_entries() {
        assert_eq!(TransportType::dropdown_labels().len(), 7);
    }
}
