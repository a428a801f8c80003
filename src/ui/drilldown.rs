//! Drill-down selection state for the staff dashboard.
//!
//! Three-step wizard: pick a department, then an academic year, then a
//! level. Breadcrumbs reset to any earlier step and discard the deeper
//! selections. Selecting a level produces the context forwarded to the
//! student list and registration views.

use crate::models::catalog::{AcademicYear, Department, Level};

/// Which list the wizard is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrillStep {
    SelectDepartment,
    SelectYear,
    SelectLevel,
}

/// The selection triple forwarded to downstream views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillContext {
    pub department_name: String,
    pub year: String,
    pub level_name: String,
}

/// Accumulated drill-down selections.
///
/// The current step is derived from what has been selected so far, so the
/// state can never point at a step whose prerequisites are missing.
#[derive(Debug, Clone, Default)]
pub struct DrillDown {
    department: Option<Department>,
    year: Option<AcademicYear>,
}

impl DrillDown {
    pub fn step(&self) -> DrillStep {
        match (&self.department, &self.year) {
            (None, _) => DrillStep::SelectDepartment,
            (Some(_), None) => DrillStep::SelectYear,
            (Some(_), Some(_)) => DrillStep::SelectLevel,
        }
    }

    pub fn department(&self) -> Option<&Department> {
        self.department.as_ref()
    }

    pub fn year(&self) -> Option<&AcademicYear> {
        self.year.as_ref()
    }

    /// Step 1: record the department and advance.
    pub fn select_department(&mut self, department: Department) {
        self.department = Some(department);
        self.year = None;
    }

    /// Step 2: record the year and advance. Ignored before step 2.
    pub fn select_year(&mut self, year: AcademicYear) {
        if self.department.is_some() {
            self.year = Some(year);
        }
    }

    /// Step 3: selecting a level completes the wizard and yields the
    /// context. `None` if the earlier selections are missing.
    pub fn select_level(&self, level: &Level) -> Option<DrillContext> {
        Some(DrillContext {
            department_name: self.department.as_ref()?.name.clone(),
            year: self.year.as_ref()?.year.clone(),
            level_name: level.name.clone(),
        })
    }

    /// Breadcrumb: back to the department list, discarding everything.
    pub fn reset(&mut self) {
        self.department = None;
        self.year = None;
    }

    /// Breadcrumb: back to the year list, keeping the department.
    pub fn back_to_years(&mut self) {
        self.year = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dept(id: i64, name: &str) -> Department {
        Department {
            id,
            name: name.to_string(),
            code: None,
        }
    }

    fn year(id: i64, label: &str) -> AcademicYear {
        AcademicYear {
            id,
            year: label.to_string(),
            is_active: true,
        }
    }

    fn level(id: i64, name: &str) -> Level {
        Level {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_forward_sequence() {
        let mut drill = DrillDown::default();
        assert_eq!(drill.step(), DrillStep::SelectDepartment);

        drill.select_department(dept(1, "Electrical"));
        assert_eq!(drill.step(), DrillStep::SelectYear);

        drill.select_year(year(1, "2025-2026"));
        assert_eq!(drill.step(), DrillStep::SelectLevel);

        let ctx = drill.select_level(&level(1, "First Year")).unwrap();
        assert_eq!(ctx.department_name, "Electrical");
        assert_eq!(ctx.year, "2025-2026");
        assert_eq!(ctx.level_name, "First Year");
    }

    #[test]
    fn test_context_reflects_last_selection_after_backtracking() {
        let mut drill = DrillDown::default();
        drill.select_department(dept(1, "Electrical"));
        drill.select_year(year(1, "2024-2025"));

        // Go all the way back, then pick a different path.
        drill.reset();
        assert_eq!(drill.step(), DrillStep::SelectDepartment);

        drill.select_department(dept(2, "Civil"));
        drill.select_year(year(2, "2025-2026"));
        drill.back_to_years();
        drill.select_year(year(3, "2026-2027"));

        let ctx = drill.select_level(&level(4, "Prep")).unwrap();
        assert_eq!(ctx.department_name, "Civil");
        assert_eq!(ctx.year, "2026-2027");
        assert_eq!(ctx.level_name, "Prep");
    }

    #[test]
    fn test_selecting_department_discards_deeper_state() {
        let mut drill = DrillDown::default();
        drill.select_department(dept(1, "Electrical"));
        drill.select_year(year(1, "2025-2026"));

        drill.select_department(dept(2, "Civil"));
        assert_eq!(drill.step(), DrillStep::SelectYear);
        assert!(drill.year().is_none());
    }

    #[test]
    fn test_year_selection_requires_department() {
        let mut drill = DrillDown::default();
        drill.select_year(year(1, "2025-2026"));
        assert_eq!(drill.step(), DrillStep::SelectDepartment);
    }

    #[test]
    fn test_level_selection_without_prerequisites_yields_nothing() {
        let drill = DrillDown::default();
        assert!(drill.select_level(&level(1, "First Year")).is_none());
    }

    #[test]
    fn test_back_to_years_keeps_department() {
        let mut drill = DrillDown::default();
        drill.select_department(dept(1, "Electrical"));
        drill.select_year(year(1, "2025-2026"));
        drill.back_to_years();

        assert_eq!(drill.step(), DrillStep::SelectYear);
        assert_eq!(drill.department().unwrap().name, "Electrical");
    }
}
