pub mod memory_repo;
pub mod record_repo;
pub mod repository_error;

use std::sync::Arc;

use mongodb::Database;

use crate::model::{aid::Aid, dues::Dues, loan::Loan, member::Member, user::User};
use memory_repo::MemoryRepository;
use record_repo::{MongoRepository, Repository};
use repository_error::RepositoryResult;

/// One repository per collection, shared by the services.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn Repository<User>>,
    pub members: Arc<dyn Repository<Member>>,
    pub dues: Arc<dyn Repository<Dues>>,
    pub loans: Arc<dyn Repository<Loan>>,
    pub aids: Arc<dyn Repository<Aid>>,
}

impl Repositories {
    /// MongoDB-backed repositories; creates the unique indexes.
    pub async fn mongo(db: &Database) -> RepositoryResult<Self> {
        let users = MongoRepository::<User>::new(db);
        users.ensure_indexes().await?;
        let members = MongoRepository::<Member>::new(db);
        members.ensure_indexes().await?;

        Ok(Repositories {
            users: Arc::new(users),
            members: Arc::new(members),
            dues: Arc::new(MongoRepository::<Dues>::new(db)),
            loans: Arc::new(MongoRepository::<Loan>::new(db)),
            aids: Arc::new(MongoRepository::<Aid>::new(db)),
        })
    }

    pub fn in_memory() -> Self {
        Repositories {
            users: Arc::new(MemoryRepository::<User>::new()),
            members: Arc::new(MemoryRepository::<Member>::new()),
            dues: Arc::new(MemoryRepository::<Dues>::new()),
            loans: Arc::new(MemoryRepository::<Loan>::new()),
            aids: Arc::new(MemoryRepository::<Aid>::new()),
        }
    }
}
