/// Use cases module containing application business logic orchestration
mod compare_releases;
mod rebase_overlay;

pub use compare_releases::CompareReleasesUseCase;
pub use rebase_overlay::RebaseOverlayUseCase;
