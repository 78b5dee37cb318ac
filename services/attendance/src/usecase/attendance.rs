use chrono::NaiveDate;

use facecheck_domain::attendance::AttendanceSummary;
use facecheck_domain::date_range::DateRange;

use crate::domain::repository::AttendanceRepository;
use crate::domain::types::{Attendance, AttendancePatch, NewAttendance};
use crate::error::AttendanceServiceError;

// ── GetAttendance ────────────────────────────────────────────────────────────

pub struct GetAttendanceUseCase<R: AttendanceRepository> {
    pub repo: R,
}

impl<R: AttendanceRepository> GetAttendanceUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Attendance, AttendanceServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AttendanceServiceError::AttendanceNotFound)
    }
}

// ── CreateAttendance ─────────────────────────────────────────────────────────

pub struct CreateAttendanceUseCase<R: AttendanceRepository> {
    pub repo: R,
}

impl<R: AttendanceRepository> CreateAttendanceUseCase<R> {
    pub async fn execute(&self, input: NewAttendance) -> Result<i32, AttendanceServiceError> {
        let id = self.repo.create(&input).await?;
        tracing::info!(
            attendance_id = id,
            student_id = input.student_id,
            status = %input.status,
            "attendance recorded"
        );
        Ok(id)
    }
}

// ── UpdateAttendance ─────────────────────────────────────────────────────────

pub struct UpdateAttendanceUseCase<R: AttendanceRepository> {
    pub repo: R,
}

impl<R: AttendanceRepository> UpdateAttendanceUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        patch: AttendancePatch,
    ) -> Result<(), AttendanceServiceError> {
        if patch.is_empty() {
            return Err(AttendanceServiceError::MissingData);
        }
        if !self.repo.update(id, &patch).await? {
            return Err(AttendanceServiceError::AttendanceNotFound);
        }
        Ok(())
    }
}

// ── DeleteAttendance ─────────────────────────────────────────────────────────

pub struct DeleteAttendanceUseCase<R: AttendanceRepository> {
    pub repo: R,
}

impl<R: AttendanceRepository> DeleteAttendanceUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), AttendanceServiceError> {
        if !self.repo.delete(id).await? {
            return Err(AttendanceServiceError::AttendanceNotFound);
        }
        Ok(())
    }
}

// ── GetClassStatistics ───────────────────────────────────────────────────────

pub struct GetClassStatisticsUseCase<R: AttendanceRepository> {
    pub repo: R,
}

impl<R: AttendanceRepository> GetClassStatisticsUseCase<R> {
    pub async fn execute(
        &self,
        class_id: i32,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<AttendanceSummary, AttendanceServiceError> {
        let range = DateRange::from_bounds(start_date, end_date)?;
        self.repo.class_statistics(class_id, range).await
    }
}

// ── GetStudentSummary ────────────────────────────────────────────────────────

pub struct GetStudentSummaryUseCase<R: AttendanceRepository> {
    pub repo: R,
}

impl<R: AttendanceRepository> GetStudentSummaryUseCase<R> {
    pub async fn execute(
        &self,
        student_id: i32,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<AttendanceSummary, AttendanceServiceError> {
        let range = DateRange::from_bounds(start_date, end_date)?;
        self.repo.student_summary(student_id, range).await
    }
}
