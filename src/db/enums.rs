use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Cycle status only ever advances forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromSqlRow, AsExpression)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    Upcoming,
    Active,
    Completed,
}

impl CycleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleStatus::Upcoming => "upcoming",
            CycleStatus::Active => "active",
            CycleStatus::Completed => "completed",
        }
    }

    pub fn can_transition(&self, next: CycleStatus) -> bool {
        matches!(
            (self, next),
            (CycleStatus::Upcoming, CycleStatus::Active)
                | (CycleStatus::Active, CycleStatus::Completed)
        )
    }
}

impl FromSql<Text, Pg> for CycleStatus {
    fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        match <String as FromSql<Text, Pg>>::from_sql(bytes)?.as_str() {
            "upcoming" => Ok(CycleStatus::Upcoming),
            "active" => Ok(CycleStatus::Active),
            "completed" => Ok(CycleStatus::Completed),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<Text, Pg> for CycleStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromSqlRow, AsExpression)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum InterestRole {
    Mentor,
    Mentee,
}

impl InterestRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterestRole::Mentor => "mentor",
            InterestRole::Mentee => "mentee",
        }
    }
}

impl FromSql<Text, Pg> for InterestRole {
    fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        match <String as FromSql<Text, Pg>>::from_sql(bytes)?.as_str() {
            "mentor" => Ok(InterestRole::Mentor),
            "mentee" => Ok(InterestRole::Mentee),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<Text, Pg> for InterestRole {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromSqlRow, AsExpression)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum InterestStatus {
    Interested,
    Withdrawn,
}

impl InterestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterestStatus::Interested => "interested",
            InterestStatus::Withdrawn => "withdrawn",
        }
    }
}

impl FromSql<Text, Pg> for InterestStatus {
    fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        match <String as FromSql<Text, Pg>>::from_sql(bytes)?.as_str() {
            "interested" => Ok(InterestStatus::Interested),
            "withdrawn" => Ok(InterestStatus::Withdrawn),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<Text, Pg> for InterestStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

/// Approval state of a scored pairing. The PENDING -> APPROVED transition is
/// the sole trigger for mentorship creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromSqlRow, AsExpression)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    Approved,
    Rejected,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Approved => "approved",
            MatchStatus::Rejected => "rejected",
        }
    }

    pub fn can_transition(&self, next: MatchStatus) -> bool {
        matches!(
            (self, next),
            (MatchStatus::Pending, MatchStatus::Approved)
                | (MatchStatus::Pending, MatchStatus::Rejected)
        )
    }
}

impl FromSql<Text, Pg> for MatchStatus {
    fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        match <String as FromSql<Text, Pg>>::from_sql(bytes)?.as_str() {
            "pending" => Ok(MatchStatus::Pending),
            "approved" => Ok(MatchStatus::Approved),
            "rejected" => Ok(MatchStatus::Rejected),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<Text, Pg> for MatchStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

/// Lifecycle of a live mentoring relationship. COMPLETED and CANCELLED are
/// terminal; no field of a terminal mentorship is mutated again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromSqlRow, AsExpression)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum MentorshipStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl MentorshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MentorshipStatus::Pending => "pending",
            MentorshipStatus::Active => "active",
            MentorshipStatus::Completed => "completed",
            MentorshipStatus::Cancelled => "cancelled",
        }
    }

    pub fn can_transition(&self, next: MentorshipStatus) -> bool {
        matches!(
            (self, next),
            (MentorshipStatus::Pending, MentorshipStatus::Active)
                | (MentorshipStatus::Pending, MentorshipStatus::Cancelled)
                | (MentorshipStatus::Active, MentorshipStatus::Completed)
                | (MentorshipStatus::Active, MentorshipStatus::Cancelled)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, MentorshipStatus::Completed | MentorshipStatus::Cancelled)
    }
}

impl FromSql<Text, Pg> for MentorshipStatus {
    fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        match <String as FromSql<Text, Pg>>::from_sql(bytes)?.as_str() {
            "pending" => Ok(MentorshipStatus::Pending),
            "active" => Ok(MentorshipStatus::Active),
            "completed" => Ok(MentorshipStatus::Completed),
            "cancelled" => Ok(MentorshipStatus::Cancelled),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<Text, Pg> for MentorshipStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromSqlRow, AsExpression)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum ProgramStatus {
    Active,
    Completed,
}

impl ProgramStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramStatus::Active => "active",
            ProgramStatus::Completed => "completed",
        }
    }

    pub fn can_transition(&self, next: ProgramStatus) -> bool {
        matches!((self, next), (ProgramStatus::Active, ProgramStatus::Completed))
    }
}

impl FromSql<Text, Pg> for ProgramStatus {
    fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        match <String as FromSql<Text, Pg>>::from_sql(bytes)?.as_str() {
            "active" => Ok(ProgramStatus::Active),
            "completed" => Ok(ProgramStatus::Completed),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<Text, Pg> for ProgramStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromSqlRow, AsExpression)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn can_transition(&self, next: TaskStatus) -> bool {
        matches!(
            (self, next),
            (TaskStatus::Pending, TaskStatus::InProgress)
                | (TaskStatus::Pending, TaskStatus::Completed)
                | (TaskStatus::InProgress, TaskStatus::Completed)
        )
    }
}

impl FromSql<Text, Pg> for TaskStatus {
    fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        match <String as FromSql<Text, Pg>>::from_sql(bytes)?.as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<Text, Pg> for TaskStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromSqlRow, AsExpression)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Learning,
    Practice,
    Reflection,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Learning => "learning",
            TaskKind::Practice => "practice",
            TaskKind::Reflection => "reflection",
        }
    }
}

impl FromSql<Text, Pg> for TaskKind {
    fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        match <String as FromSql<Text, Pg>>::from_sql(bytes)?.as_str() {
            "learning" => Ok(TaskKind::Learning),
            "practice" => Ok(TaskKind::Practice),
            "reflection" => Ok(TaskKind::Reflection),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<Text, Pg> for TaskKind {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromSqlRow, AsExpression)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationKind {
    MidProgram,
    Final,
}

impl EvaluationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationKind::MidProgram => "mid_program",
            EvaluationKind::Final => "final",
        }
    }
}

impl FromSql<Text, Pg> for EvaluationKind {
    fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        match <String as FromSql<Text, Pg>>::from_sql(bytes)?.as_str() {
            "mid_program" => Ok(EvaluationKind::MidProgram),
            "final" => Ok(EvaluationKind::Final),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<Text, Pg> for EvaluationKind {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_status_only_moves_forward() {
        assert!(CycleStatus::Upcoming.can_transition(CycleStatus::Active));
        assert!(CycleStatus::Active.can_transition(CycleStatus::Completed));
        assert!(!CycleStatus::Active.can_transition(CycleStatus::Upcoming));
        assert!(!CycleStatus::Completed.can_transition(CycleStatus::Active));
        assert!(!CycleStatus::Upcoming.can_transition(CycleStatus::Completed));
    }

    #[test]
    fn match_status_resolves_once() {
        assert!(MatchStatus::Pending.can_transition(MatchStatus::Approved));
        assert!(MatchStatus::Pending.can_transition(MatchStatus::Rejected));
        assert!(!MatchStatus::Approved.can_transition(MatchStatus::Rejected));
        assert!(!MatchStatus::Rejected.can_transition(MatchStatus::Approved));
        assert!(!MatchStatus::Approved.can_transition(MatchStatus::Pending));
    }

    #[test]
    fn mentorship_terminal_states_are_final() {
        assert!(MentorshipStatus::Pending.can_transition(MentorshipStatus::Active));
        assert!(MentorshipStatus::Active.can_transition(MentorshipStatus::Completed));
        assert!(MentorshipStatus::Active.can_transition(MentorshipStatus::Cancelled));
        assert!(MentorshipStatus::Pending.can_transition(MentorshipStatus::Cancelled));
        assert!(!MentorshipStatus::Pending.can_transition(MentorshipStatus::Completed));
        for terminal in [MentorshipStatus::Completed, MentorshipStatus::Cancelled] {
            assert!(terminal.is_terminal());
            for next in [
                MentorshipStatus::Pending,
                MentorshipStatus::Active,
                MentorshipStatus::Completed,
                MentorshipStatus::Cancelled,
            ] {
                assert!(!terminal.can_transition(next));
            }
        }
    }

    #[test]
    fn task_completion_is_one_way() {
        assert!(TaskStatus::Pending.can_transition(TaskStatus::InProgress));
        assert!(TaskStatus::Pending.can_transition(TaskStatus::Completed));
        assert!(TaskStatus::InProgress.can_transition(TaskStatus::Completed));
        assert!(!TaskStatus::Completed.can_transition(TaskStatus::Pending));
        assert!(!TaskStatus::Completed.can_transition(TaskStatus::InProgress));
        assert!(!TaskStatus::InProgress.can_transition(TaskStatus::Pending));
    }

    #[test]
    fn program_only_completes() {
        assert!(ProgramStatus::Active.can_transition(ProgramStatus::Completed));
        assert!(!ProgramStatus::Completed.can_transition(ProgramStatus::Active));
    }
}
