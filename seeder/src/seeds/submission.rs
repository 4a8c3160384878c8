use crate::seed::Seeder;
use async_trait::async_trait;
use db::models::subject::Model as SubjectModel;
use db::models::submission::{Model, NewSubmission};
use fake::{
    Fake,
    faker::{internet::en::SafeEmail, lorem::en::Sentence, name::en::Name},
};
use sea_orm::{DatabaseConnection, DbErr};

const SAMPLES: &[(&str, &str, &str)] = &[
    ("Linked List", ".py", "class Node:\n    def __init__(self, value):\n        self.value = value\n        self.next = None\n"),
    ("Binary Search", ".py", "def search(xs, x):\n    lo, hi = 0, len(xs)\n    while lo < hi:\n        mid = (lo + hi) // 2\n        if xs[mid] < x:\n            lo = mid + 1\n        else:\n            hi = mid\n    return lo\n"),
    ("Bresenham Line", ".cpp", "void line(int x0, int y0, int x1, int y1);\n"),
    ("Round Robin", ".c", "int main(void) { return 0; }\n"),
];

/// A handful of pending submissions so the review queue is not empty. Skipped once
/// any submission exists.
pub struct SubmissionSeeder;

#[async_trait]
impl Seeder for SubmissionSeeder {
    fn name(&self) -> &'static str {
        "Submission"
    }

    async fn seed(&self, db: &DatabaseConnection) -> Result<usize, DbErr> {
        let subjects = SubjectModel::find_all(db).await?;
        if subjects.is_empty() || !Model::find_all(db).await?.is_empty() {
            return Ok(0);
        }

        for (title, extension, code) in SAMPLES {
            let subject = &subjects[fastrand::usize(..subjects.len())];
            let description: String = Sentence(4..10).fake();
            Model::create(
                db,
                NewSubmission {
                    name: Name().fake(),
                    email: SafeEmail().fake(),
                    subject_id: subject.id,
                    title: (*title).to_owned(),
                    description,
                    code: (*code).to_owned(),
                    extension: (*extension).to_owned(),
                },
            )
            .await?;
        }
        Ok(SAMPLES.len())
    }
}
