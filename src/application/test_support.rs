//! In-memory implementations of the storage ports for use-case tests. They
//! reproduce the storage semantics the policies rely on: unique
//! username/email, unique (project, freelancer), newest-first listings.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::ports::bid_repository::{BidChanges, BidRepository, NewBid};
use crate::application::ports::project_repository::{
    NewProject, ProjectChanges, ProjectFilter, ProjectRepository,
};
use crate::application::ports::user_repository::{UserRecord, UserRepository};
use crate::domain::bids::bid::Bid;
use crate::domain::projects::project::{Project, ProjectStatus};
use crate::domain::users::user::{Role, User};

pub fn decimal(s: &str) -> BigDecimal {
    s.parse().unwrap()
}

#[derive(Default)]
pub struct MemoryUserRepository {
    records: Mutex<Vec<UserRecord>>,
}

impl MemoryUserRepository {
    fn username_of(&self, id: Uuid) -> Option<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.user.id == id)
            .map(|r| r.user.username.clone())
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, AppError> {
        let mut records = self.records.lock().unwrap();
        if records
            .iter()
            .any(|r| r.user.username == username || r.user.email == email)
        {
            return Err(AppError::Conflict(
                "A user with that username or email already exists.".into(),
            ));
        }
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            role,
            created_at: Utc::now(),
        };
        records.push(UserRecord {
            user: user.clone(),
            password_hash: password_hash.to_string(),
        });
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.user.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.user.id == id)
            .map(|r| r.user.clone()))
    }
}

pub struct MemoryProjectRepository {
    users: Arc<MemoryUserRepository>,
    projects: Mutex<Vec<Project>>,
}

impl MemoryProjectRepository {
    pub fn new(users: Arc<MemoryUserRepository>) -> Self {
        Self {
            users,
            projects: Mutex::new(Vec::new()),
        }
    }

    fn get_sync(&self, id: Uuid) -> Option<Project> {
        self.projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }
}

#[async_trait]
impl ProjectRepository for MemoryProjectRepository {
    async fn create_for_client(
        &self,
        client_id: Uuid,
        new: &NewProject,
    ) -> Result<Project, AppError> {
        let project = Project {
            id: Uuid::new_v4(),
            title: new.title.clone(),
            description: new.description.clone(),
            budget: new.budget.clone(),
            client_id,
            client_username: self.users.username_of(client_id).unwrap_or_default(),
            status: new.status,
            created_at: Utc::now(),
        };
        self.projects.lock().unwrap().push(project.clone());
        Ok(project)
    }

    async fn list(&self, filter: &ProjectFilter) -> Result<Vec<Project>, AppError> {
        let needle = filter.search.as_deref().map(str::to_lowercase);
        Ok(self
            .projects
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|p| filter.client_id.is_none_or(|id| p.client_id == id))
            .filter(|p| {
                needle
                    .as_deref()
                    .is_none_or(|n| p.title.to_lowercase().contains(n))
            })
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, AppError> {
        Ok(self.get_sync(id))
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &ProjectChanges,
    ) -> Result<Option<Project>, AppError> {
        let mut projects = self.projects.lock().unwrap();
        let Some(project) = projects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &changes.title {
            project.title = title.clone();
        }
        if let Some(description) = &changes.description {
            project.description = description.clone();
        }
        if let Some(budget) = &changes.budget {
            project.budget = budget.clone();
        }
        if let Some(status) = changes.status {
            project.status = status;
        }
        Ok(Some(project.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut projects = self.projects.lock().unwrap();
        let before = projects.len();
        projects.retain(|p| p.id != id);
        Ok(projects.len() < before)
    }
}

pub struct MemoryBidRepository {
    users: Arc<MemoryUserRepository>,
    projects: Arc<MemoryProjectRepository>,
    bids: Mutex<Vec<Bid>>,
}

impl MemoryBidRepository {
    pub fn new(users: Arc<MemoryUserRepository>, projects: Arc<MemoryProjectRepository>) -> Self {
        Self {
            users,
            projects,
            bids: Mutex::new(Vec::new()),
        }
    }

    fn scoped(&self, keep: impl Fn(&Bid) -> bool) -> Vec<Bid> {
        self.bids
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|b| keep(b))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl BidRepository for MemoryBidRepository {
    async fn create_for_freelancer(
        &self,
        freelancer_id: Uuid,
        new: &NewBid,
    ) -> Result<Bid, AppError> {
        let project = self
            .projects
            .get_sync(new.project_id)
            .ok_or_else(|| AppError::NotFound("Project not found.".into()))?;
        let mut bids = self.bids.lock().unwrap();
        if bids
            .iter()
            .any(|b| b.project_id == new.project_id && b.freelancer_id == freelancer_id)
        {
            return Err(AppError::Conflict(
                "You have already placed a bid on this project.".into(),
            ));
        }
        let bid = Bid {
            id: Uuid::new_v4(),
            project_id: project.id,
            project_title: project.title.clone(),
            project_client_id: project.client_id,
            freelancer_id,
            freelancer_username: self.users.username_of(freelancer_id).unwrap_or_default(),
            amount: new.amount.clone(),
            cover_letter: new.cover_letter.clone(),
            created_at: Utc::now(),
        };
        bids.push(bid.clone());
        Ok(bid)
    }

    async fn list_by_freelancer(&self, freelancer_id: Uuid) -> Result<Vec<Bid>, AppError> {
        Ok(self.scoped(|b| b.freelancer_id == freelancer_id))
    }

    async fn list_by_project_client(&self, client_id: Uuid) -> Result<Vec<Bid>, AppError> {
        Ok(self.scoped(|b| b.project_client_id == client_id))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bid>, AppError> {
        Ok(self.bids.lock().unwrap().iter().find(|b| b.id == id).cloned())
    }

    async fn update(&self, id: Uuid, changes: &BidChanges) -> Result<Option<Bid>, AppError> {
        let mut bids = self.bids.lock().unwrap();
        let Some(bid) = bids.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        if let Some(amount) = &changes.amount {
            bid.amount = amount.clone();
        }
        if let Some(cover_letter) = &changes.cover_letter {
            bid.cover_letter = cover_letter.clone();
        }
        Ok(Some(bid.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut bids = self.bids.lock().unwrap();
        let before = bids.len();
        bids.retain(|b| b.id != id);
        Ok(bids.len() < before)
    }
}

/// The three memory repositories wired together, plus seeding shortcuts.
pub struct Fixtures {
    pub users: Arc<MemoryUserRepository>,
    pub projects: Arc<MemoryProjectRepository>,
    pub bids: Arc<MemoryBidRepository>,
}

pub fn fixtures() -> Fixtures {
    let users = Arc::new(MemoryUserRepository::default());
    let projects = Arc::new(MemoryProjectRepository::new(users.clone()));
    let bids = Arc::new(MemoryBidRepository::new(users.clone(), projects.clone()));
    Fixtures {
        users,
        projects,
        bids,
    }
}

impl Fixtures {
    async fn register(&self, username: &str, role: Role) -> User {
        self.users
            .create_user(username, &format!("{username}@example.com"), "!", role)
            .await
            .unwrap()
    }

    pub async fn register_client(&self, username: &str) -> User {
        self.register(username, Role::Client).await
    }

    pub async fn register_freelancer(&self, username: &str) -> User {
        self.register(username, Role::Freelancer).await
    }

    pub async fn post_project(&self, client: &User, title: &str, budget: BigDecimal) -> Project {
        self.projects
            .create_for_client(
                client.id,
                &NewProject {
                    title: title.into(),
                    description: format!("{title} for {}", client.username),
                    budget,
                    status: ProjectStatus::Open,
                },
            )
            .await
            .unwrap()
    }

    pub async fn place_bid(&self, freelancer: &User, project: &Project, amount: BigDecimal) -> Bid {
        self.bids
            .create_for_freelancer(
                freelancer.id,
                &NewBid {
                    project_id: project.id,
                    amount,
                    cover_letter: format!("{} offering on {}", freelancer.username, project.title),
                },
            )
            .await
            .unwrap()
    }
}
