//! Column-name mapping for task tables.
//!
//! Each field accepts exactly two spellings (case-sensitive): the snake_case
//! field name, and the Title_Case name used by exported task tables.
//!
//! | field                | export name          | required |
//! |----------------------|----------------------|----------|
//! | `start_time`         | `Start_Time`         | yes      |
//! | `end_time`           | `End_Time`           | yes      |
//! | `department`         | `Department`         | yes      |
//! | `priority_level`     | `Priority_Level`     | yes      |
//! | `assigned_employee`  | `Assigned_Employee`  | yes      |
//! | `approval_level`     | `Approval_Level`     | no       |
//! | `estimated_duration` | `Estimated_Duration` | yes      |
//! | `actual_duration`    | `Actual_Duration`    | yes      |
//! | `cost_per_task`      | `Cost_Per_Task`      | yes      |

use csv::StringRecord;

use crate::error::{IngestError, IngestResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    StartTime,
    EndTime,
    Department,
    PriorityLevel,
    AssignedEmployee,
    ApprovalLevel,
    EstimatedDuration,
    ActualDuration,
    CostPerTask,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::StartTime,
        Column::EndTime,
        Column::Department,
        Column::PriorityLevel,
        Column::AssignedEmployee,
        Column::ApprovalLevel,
        Column::EstimatedDuration,
        Column::ActualDuration,
        Column::CostPerTask,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Column::StartTime => "start_time",
            Column::EndTime => "end_time",
            Column::Department => "department",
            Column::PriorityLevel => "priority_level",
            Column::AssignedEmployee => "assigned_employee",
            Column::ApprovalLevel => "approval_level",
            Column::EstimatedDuration => "estimated_duration",
            Column::ActualDuration => "actual_duration",
            Column::CostPerTask => "cost_per_task",
        }
    }

    pub fn export_name(&self) -> &'static str {
        match self {
            Column::StartTime => "Start_Time",
            Column::EndTime => "End_Time",
            Column::Department => "Department",
            Column::PriorityLevel => "Priority_Level",
            Column::AssignedEmployee => "Assigned_Employee",
            Column::ApprovalLevel => "Approval_Level",
            Column::EstimatedDuration => "Estimated_Duration",
            Column::ActualDuration => "Actual_Duration",
            Column::CostPerTask => "Cost_Per_Task",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, Column::ApprovalLevel)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Resolved header positions for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    positions: [Option<usize>; 9],
}

impl ColumnMap {
    /// Resolve every known column; fails on the first missing required one.
    pub fn from_headers(headers: &StringRecord) -> IngestResult<Self> {
        let mut positions = [None; 9];

        for col in Column::ALL {
            let pos = headers
                .iter()
                .position(|h| h.trim() == col.name())
                .or_else(|| headers.iter().position(|h| h.trim() == col.export_name()));

            if pos.is_none() && col.is_required() {
                return Err(IngestError::MissingColumn {
                    column: col.name(),
                    export_name: col.export_name(),
                });
            }
            positions[col.index()] = pos;
        }

        Ok(Self { positions })
    }

    pub fn position(&self, col: Column) -> Option<usize> {
        self.positions[col.index()]
    }

    /// Trimmed cell for `col`; "" when the column or cell is absent.
    pub fn cell<'r>(&self, record: &'r StringRecord, col: Column) -> &'r str {
        self.position(col)
            .and_then(|i| record.get(i))
            .unwrap_or("")
            .trim()
    }
}
