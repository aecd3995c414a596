use crate::config::BasePath;
use crate::domain::course::{Course, Level};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct CourseRow<'a> {
    id: &'a str,
    title: &'a str,
    instructor: &'a str,
    duration: &'a str,
    level: Level,
    price: Decimal,
    list_price: Decimal,
    rating: Decimal,
    students: u32,
    link: String,
}

/// Exports the catalog as CSV, one course per row.
pub struct CourseWriter<W: Write> {
    writer: csv::Writer<W>,
    base_path: BasePath,
}

impl<W: Write> CourseWriter<W> {
    pub fn new(sink: W, base_path: BasePath) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
            base_path,
        }
    }

    pub fn write_courses(&mut self, courses: &[Course]) -> Result<()> {
        for course in courses {
            self.writer.serialize(CourseRow {
                id: &course.id,
                title: &course.title,
                instructor: &course.instructor,
                duration: &course.duration,
                level: course.level,
                price: course.price.value().normalize(),
                list_price: course.list_price().normalize(),
                rating: course.rating,
                students: course.students,
                link: self.base_path.course_link(&course.id),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
