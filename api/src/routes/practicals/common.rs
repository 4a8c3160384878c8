use db::models::practical::Model as PracticalModel;
use db::models::subject::Model as SubjectModel;
use serde::Serialize;

/// A practical with its subject expanded, as returned by the listing.
#[derive(Debug, Serialize)]
pub struct PracticalResponse {
    #[serde(flatten)]
    pub practical: PracticalModel,
    pub subject: Option<SubjectModel>,
}

impl From<(PracticalModel, Option<SubjectModel>)> for PracticalResponse {
    fn from((practical, subject): (PracticalModel, Option<SubjectModel>)) -> Self {
        Self { practical, subject }
    }
}
