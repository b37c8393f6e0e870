//! Employee model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CompanyId, EmployeeId};

/// Represents an employee whose work time is tracked.
///
/// Only the fields the engine aggregates over are carried here; identity
/// and credentials live in the excluded authentication layer. The hourly
/// rate is the employee's *current* rate: rate changes affect only future
/// aggregation and never retroactively recompute past pay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: EmployeeId,
    /// The organizational scope the employee belongs to.
    pub company_id: CompanyId,
    /// Display name used in payroll rows.
    pub name: String,
    /// Current hourly rate (non-negative).
    pub hourly_rate: Decimal,
    /// Soft-delete flag; deactivated employees keep their historical
    /// shifts and segments.
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_employee() {
        let json = r#"{
            "id": 2,
            "company_id": 1,
            "name": "Field Employee",
            "hourly_rate": "25.50",
            "active": true
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, 2);
        assert_eq!(employee.company_id, 1);
        assert_eq!(employee.name, "Field Employee");
        assert_eq!(employee.hourly_rate, Decimal::new(2550, 2));
        assert!(employee.active);
    }

    #[test]
    fn test_serialize_employee_round_trip() {
        let employee = Employee {
            id: 2,
            company_id: 1,
            name: "Field Employee".to_string(),
            hourly_rate: Decimal::new(2550, 2),
            active: true,
        };
        let json = serde_json::to_string(&employee).unwrap();
        let deserialized: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }
}
