use crate::suggest::RankingSession;

pub struct AppState {
    pub session: RankingSession,
}
