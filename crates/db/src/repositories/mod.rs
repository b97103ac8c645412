//! Repository structs, one per entity, with static async methods taking a
//! pool reference.

mod college_repo;
mod program_repo;
mod student_repo;
mod user_repo;

pub use college_repo::CollegeRepo;
pub use program_repo::ProgramRepo;
pub use student_repo::StudentRepo;
pub use user_repo::UserRepo;
