//! 出勤率与成绩汇总
//!
//! 纯函数，每次请求都从原始记录重新计算，不做缓存。

use std::collections::BTreeMap;

use crate::errors::{PortalError, Result};
use crate::models::attendance::entities::{AttendanceRecord, AttendanceStatus};
use crate::models::attendance::responses::AttendanceSummary;
use crate::models::marks::entities::MarkEntry;

/// 出勤率 = round(100 × present / total)；没有任何课次时为 None
pub fn attendance_percentage(present: u32, total: u32) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some((100.0 * f64::from(present) / f64::from(total)).round())
}

/// 汇总一组考勤记录；请假不计入出勤
pub fn summarize_attendance<'a, I>(records: I) -> AttendanceSummary
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut summary = AttendanceSummary::default();
    for record in records {
        summary.total_classes += 1;
        match record.status {
            AttendanceStatus::Present => summary.present_count += 1,
            AttendanceStatus::Absent => summary.absent_count += 1,
            AttendanceStatus::Leave => summary.leave_count += 1,
        }
    }
    summary.attendance_percentage =
        attendance_percentage(summary.present_count, summary.total_classes);
    summary
}

/// 按课程分组汇总，结果按课程 ID 升序
///
/// `subject_ids` 中没有任何考勤的课程也会出现，出勤率为 None。
pub fn attendance_by_subject(
    subject_ids: &[i64],
    records: &[AttendanceRecord],
) -> Vec<(i64, AttendanceSummary)> {
    let mut grouped: BTreeMap<i64, Vec<&AttendanceRecord>> =
        subject_ids.iter().map(|id| (*id, Vec::new())).collect();
    for record in records {
        grouped.entry(record.subject_id).or_default().push(record);
    }

    grouped
        .into_iter()
        .map(|(subject_id, rows)| (subject_id, summarize_attendance(rows)))
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 折算到 10 分制的单次成绩
fn grade_point(entry: &MarkEntry) -> Result<f64> {
    if entry.max_marks <= 0 {
        return Err(PortalError::data_integrity(format!(
            "Mark entry {} has non-positive max marks {}",
            entry.id, entry.max_marks
        )));
    }
    Ok(f64::from(entry.marks) / f64::from(entry.max_marks) * 10.0)
}

/// CGPA：所有成绩记录 (marks / max_marks × 10) 的算术平均，保留两位小数
///
/// 每条记录权重相同。没有记录时为 None；任意记录满分不为正时返回数据错误。
/// 求和前先排序，结果与记录顺序无关。
pub fn cgpa(entries: &[MarkEntry]) -> Result<Option<f64>> {
    if entries.is_empty() {
        return Ok(None);
    }

    let mut points = entries.iter().map(grade_point).collect::<Result<Vec<f64>>>()?;
    points.sort_by(f64::total_cmp);

    let sum: f64 = points.iter().sum();
    Ok(Some(round2(sum / points.len() as f64)))
}

/// 单门课程的成绩统计
#[derive(Debug, Clone, PartialEq)]
pub struct MarkTally {
    pub subject_id: i64,
    pub exam_count: u32,
    /// 原始分数的平均值，保留两位小数
    pub average_marks: Option<f64>,
    /// 该课程各次考试中最大的满分
    pub max_marks: Option<i32>,
}

/// 按课程汇总成绩，结果按课程 ID 升序；没有成绩的课程平均分与满分为 None
pub fn subject_mark_summary(subject_ids: &[i64], entries: &[MarkEntry]) -> Vec<MarkTally> {
    let mut grouped: BTreeMap<i64, Vec<&MarkEntry>> =
        subject_ids.iter().map(|id| (*id, Vec::new())).collect();
    for entry in entries {
        grouped.entry(entry.subject_id).or_default().push(entry);
    }

    grouped
        .into_iter()
        .map(|(subject_id, rows)| {
            let mut marks: Vec<i64> = rows.iter().map(|e| i64::from(e.marks)).collect();
            marks.sort_unstable();
            let total: i64 = marks.iter().sum();
            MarkTally {
                subject_id,
                exam_count: rows.len() as u32,
                average_marks: (!rows.is_empty())
                    .then(|| round2(total as f64 / rows.len() as f64)),
                max_marks: rows.iter().map(|e| e.max_marks).max(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: i64, subject_id: i64, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id,
            student_id: 1,
            subject_id,
            date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap() + chrono::Days::new(id as u64),
            status,
            marked_by: Some(2),
            created_at: chrono::Utc::now(),
        }
    }

    fn mark(id: i64, subject_id: i64, marks: i32, max_marks: i32) -> MarkEntry {
        MarkEntry {
            id,
            student_id: 1,
            subject_id,
            exam_type: "Internal".to_string(),
            marks,
            max_marks,
            semester: Some(5),
            entered_by: Some(2),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_percentage_undefined_without_classes() {
        assert_eq!(attendance_percentage(0, 0), None);
        assert_eq!(attendance_percentage(0, 4), Some(0.0));
        assert_eq!(attendance_percentage(4, 4), Some(100.0));
        assert_eq!(attendance_percentage(2, 3), Some(67.0));
        assert_eq!(attendance_percentage(1, 3), Some(33.0));
    }

    #[test]
    fn test_percentage_stays_in_range() {
        for total in 1..=40u32 {
            for present in 0..=total {
                let pct = attendance_percentage(present, total).unwrap();
                assert!((0.0..=100.0).contains(&pct));
                assert_eq!(pct, (100.0 * present as f64 / total as f64).round());
            }
        }
    }

    #[test]
    fn test_leave_counts_as_not_present() {
        use AttendanceStatus::*;
        let rows = vec![
            record(1, 7, Present),
            record(2, 7, Leave),
            record(3, 7, Absent),
            record(4, 7, Present),
        ];
        let summary = summarize_attendance(&rows);
        assert_eq!(summary.total_classes, 4);
        assert_eq!(summary.present_count, 2);
        assert_eq!(summary.absent_count, 1);
        assert_eq!(summary.leave_count, 1);
        assert_eq!(summary.attendance_percentage, Some(50.0));
    }

    #[test]
    fn test_empty_summary_has_null_percentage() {
        let summary = summarize_attendance(&[]);
        assert_eq!(summary, AttendanceSummary::default());
        assert!(summary.attendance_percentage.is_none());
    }

    #[test]
    fn test_grouped_by_subject() {
        use AttendanceStatus::*;
        let rows = vec![
            record(1, 9, Present),
            record(2, 3, Absent),
            record(3, 9, Absent),
            record(4, 3, Absent),
        ];
        let grouped = attendance_by_subject(&[], &rows);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, 3);
        assert_eq!(grouped[0].1.attendance_percentage, Some(0.0));
        assert_eq!(grouped[1].0, 9);
        assert_eq!(grouped[1].1.attendance_percentage, Some(50.0));
    }

    #[test]
    fn test_subject_without_sessions_has_null_percentage() {
        let rows = vec![record(1, 3, AttendanceStatus::Present)];
        let grouped = attendance_by_subject(&[3, 8], &rows);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].1.attendance_percentage, Some(100.0));
        assert_eq!(grouped[1].0, 8);
        assert_eq!(grouped[1].1.total_classes, 0);
        assert_eq!(grouped[1].1.attendance_percentage, None);
    }

    #[test]
    fn test_subject_without_marks_has_null_average() {
        let entries = vec![mark(1, 2, 18, 20)];
        let summary = subject_mark_summary(&[2, 5], &entries);
        assert_eq!(
            summary[1],
            MarkTally {
                subject_id: 5,
                exam_count: 0,
                average_marks: None,
                max_marks: None,
            }
        );
    }

    #[test]
    fn test_cgpa_mean_of_ten_point_scores() {
        let entries = vec![mark(1, 1, 18, 20), mark(2, 2, 35, 50), mark(3, 1, 80, 100)];
        // (9.0 + 7.0 + 8.0) / 3
        assert_eq!(cgpa(&entries).unwrap(), Some(8.0));

        let entries = vec![mark(1, 1, 2, 3), mark(2, 1, 1, 3)];
        // (6.666.. + 3.333..) / 2 = 5.0
        assert_eq!(cgpa(&entries).unwrap(), Some(5.0));

        let entries = vec![mark(1, 1, 1, 3)];
        assert_eq!(cgpa(&entries).unwrap(), Some(3.33));
    }

    #[test]
    fn test_cgpa_is_order_independent() {
        let mut entries = vec![
            mark(1, 1, 17, 23),
            mark(2, 2, 41, 57),
            mark(3, 3, 9, 11),
            mark(4, 1, 88, 97),
        ];
        let expected = cgpa(&entries).unwrap();
        entries.reverse();
        assert_eq!(cgpa(&entries).unwrap(), expected);
        entries.swap(0, 2);
        assert_eq!(cgpa(&entries).unwrap(), expected);
    }

    #[test]
    fn test_cgpa_empty_is_none() {
        assert_eq!(cgpa(&[]).unwrap(), None);
    }

    #[test]
    fn test_cgpa_zero_max_fails_closed() {
        let entries = vec![mark(1, 1, 18, 20), mark(2, 1, 5, 0)];
        let err = cgpa(&entries).unwrap_err();
        assert_eq!(err.code(), "E011");
    }

    #[test]
    fn test_subject_mark_summary() {
        let entries = vec![mark(1, 2, 18, 20), mark(2, 2, 40, 50), mark(3, 1, 7, 10)];
        let summary = subject_mark_summary(&[1, 2], &entries);
        assert_eq!(
            summary,
            vec![
                MarkTally {
                    subject_id: 1,
                    exam_count: 1,
                    average_marks: Some(7.0),
                    max_marks: Some(10),
                },
                MarkTally {
                    subject_id: 2,
                    exam_count: 2,
                    average_marks: Some(29.0),
                    max_marks: Some(50),
                },
            ]
        );
    }
}
