use crate::domain::course::{Course, Level, Price};
use crate::domain::ports::CatalogProvider;
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::num::NonZeroU32;
use std::sync::Arc;

/// The built-in LearnHub catalog, held in memory and never modified.
///
/// Cloning shares the same course list.
#[derive(Clone, Debug)]
pub struct StaticCatalog {
    courses: Arc<Vec<Course>>,
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticCatalog {
    /// Creates the catalog with the six stock courses.
    pub fn new() -> Self {
        Self::from_courses(stock_courses())
    }

    /// Serves an arbitrary, already validated course list.
    pub fn from_courses(courses: Vec<Course>) -> Self {
        Self {
            courses: Arc::new(courses),
        }
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn courses(&self) -> Result<Vec<Course>> {
        Ok(self.courses.as_ref().clone())
    }

    async fn course(&self, id: &str) -> Result<Option<Course>> {
        Ok(self.courses.iter().find(|c| c.id == id).cloned())
    }
}

/// One row of the built-in catalog. Prices are checked when the table is
/// compiled.
struct StockCourse {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    price: NonZeroU32,
    instructor: &'static str,
    duration: &'static str,
    level: Level,
    image: &'static str,
    rating: Decimal,
    students: u32,
}

impl From<&StockCourse> for Course {
    fn from(stock: &StockCourse) -> Self {
        Course {
            id: stock.id.to_string(),
            title: stock.title.to_string(),
            description: stock.description.to_string(),
            price: Price::from(stock.price),
            instructor: stock.instructor.to_string(),
            duration: stock.duration.to_string(),
            level: stock.level,
            image: stock.image.to_string(),
            rating: stock.rating,
            students: stock.students,
        }
    }
}

const fn rupees(value: u32) -> NonZeroU32 {
    match NonZeroU32::new(value) {
        Some(price) => price,
        None => panic!("stock course prices must be positive"),
    }
}

const STOCK_COURSES: [StockCourse; 6] = [
    StockCourse {
        id: "1",
        title: "Complete Web Development Bootcamp",
        description:
            "Master HTML, CSS, JavaScript, React, Node.js, and MongoDB in one comprehensive course",
        price: rupees(2999),
        instructor: "Sarah Johnson",
        duration: "40 hours",
        level: Level::Beginner,
        image: "web development coding",
        rating: dec!(4.8),
        students: 15420,
    },
    StockCourse {
        id: "2",
        title: "Python for Data Science & Machine Learning",
        description: "Learn Python, NumPy, Pandas, Matplotlib, Scikit-Learn, TensorFlow and more",
        price: rupees(3499),
        instructor: "Dr. Michael Chen",
        duration: "35 hours",
        level: Level::Intermediate,
        image: "data science python",
        rating: dec!(4.9),
        students: 12350,
    },
    StockCourse {
        id: "3",
        title: "UI/UX Design Masterclass",
        description: "Complete guide to user interface and user experience design with Figma",
        price: rupees(2499),
        instructor: "Emma Williams",
        duration: "28 hours",
        level: Level::Beginner,
        image: "ui ux design",
        rating: dec!(4.7),
        students: 9840,
    },
    StockCourse {
        id: "4",
        title: "Mobile App Development with React Native",
        description: "Build iOS and Android apps with React Native and JavaScript",
        price: rupees(3199),
        instructor: "David Martinez",
        duration: "32 hours",
        level: Level::Intermediate,
        image: "mobile app development",
        rating: dec!(4.6),
        students: 7230,
    },
    StockCourse {
        id: "5",
        title: "Digital Marketing & SEO Complete Course",
        description: "Master SEO, social media marketing, email marketing, and analytics",
        price: rupees(1999),
        instructor: "Lisa Anderson",
        duration: "24 hours",
        level: Level::Beginner,
        image: "digital marketing",
        rating: dec!(4.5),
        students: 11560,
    },
    StockCourse {
        id: "6",
        title: "Cloud Computing with AWS",
        description: "Learn Amazon Web Services from basics to advanced certification",
        price: rupees(3999),
        instructor: "Robert Taylor",
        duration: "45 hours",
        level: Level::Advanced,
        image: "cloud computing",
        rating: dec!(4.8),
        students: 6780,
    },
];

fn stock_courses() -> Vec<Course> {
    STOCK_COURSES.iter().map(Course::from).collect()
}
