use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::dto::loan_dto::{CreateLoanRequest, LoanView, UpdateLoanRequest};
use crate::model::{dues::Dues, loan::Loan, member::Member};
use crate::repository::record_repo::Repository;
use crate::service::{member_views, not_found_as, parse_id, resolve_member, ServiceResult};
use crate::util::error::ServiceError;

const NOT_FOUND: &str = "Prêt non trouvé";

#[async_trait]
pub trait LoanService: Send + Sync {
    async fn add(&self, request: CreateLoanRequest) -> ServiceResult<LoanView>;
    async fn list(&self) -> ServiceResult<Vec<LoanView>>;
    async fn get(&self, id: &str) -> ServiceResult<LoanView>;
    async fn update(&self, id: &str, request: UpdateLoanRequest) -> ServiceResult<LoanView>;
    async fn delete(&self, id: &str) -> ServiceResult<()>;
}

pub struct LoanServiceImpl {
    pub loans: Arc<dyn Repository<Loan>>,
    pub dues: Arc<dyn Repository<Dues>>,
    pub members: Arc<dyn Repository<Member>>,
}

impl LoanServiceImpl {
    pub fn new(
        loans: Arc<dyn Repository<Loan>>,
        dues: Arc<dyn Repository<Dues>>,
        members: Arc<dyn Repository<Member>>,
    ) -> Self {
        Self { loans, dues, members }
    }

    async fn populate(&self, records: Vec<Loan>) -> ServiceResult<Vec<LoanView>> {
        let views = member_views(
            self.members.as_ref(),
            self.dues.as_ref(),
            records.iter().map(|r| r.beneficiary),
        )
        .await?;
        Ok(records
            .into_iter()
            .map(|loan| {
                let beneficiary = views.get(&loan.beneficiary).cloned();
                LoanView::new(loan, beneficiary)
            })
            .collect())
    }

    async fn populate_one(&self, loan: Loan) -> ServiceResult<LoanView> {
        self.populate(vec![loan])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::InternalError("populate returned no record".to_string()))
    }
}

#[async_trait]
impl LoanService for LoanServiceImpl {
    #[instrument(skip(self, request), fields(beneficiaire = ?request.beneficiaire))]
    async fn add(&self, request: CreateLoanRequest) -> ServiceResult<LoanView> {
        let raw_beneficiary = request.beneficiaire.clone().unwrap_or_default();
        let beneficiary = resolve_member(self.members.as_ref(), "beneficiaire", &raw_beneficiary).await?;
        let stored = self.loans.insert(request.into_loan(beneficiary)).await?;
        info!("Loan recorded");
        self.populate_one(stored).await
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ServiceResult<Vec<LoanView>> {
        let records = self.loans.find_many(None).await?;
        self.populate(records).await
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> ServiceResult<LoanView> {
        let id = parse_id(id, NOT_FOUND)?;
        let loan = self
            .loans
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))?;
        self.populate_one(loan).await
    }

    #[instrument(skip(self, request))]
    async fn update(&self, id: &str, request: UpdateLoanRequest) -> ServiceResult<LoanView> {
        let id = parse_id(id, NOT_FOUND)?;
        let mut loan = self
            .loans
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))?;
        let beneficiary = match request.beneficiaire.as_deref() {
            Some(raw) if raw != loan.beneficiary.to_hex() => {
                Some(resolve_member(self.members.as_ref(), "beneficiaire", raw).await?)
            }
            _ => None,
        };
        request.apply(&mut loan, beneficiary);
        let stored = self.loans.replace(&id, loan).await.map_err(not_found_as(NOT_FOUND))?;
        info!("Loan updated");
        self.populate_one(stored).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ServiceResult<()> {
        let id = parse_id(id, NOT_FOUND)?;
        self.loans.delete(&id).await.map_err(not_found_as(NOT_FOUND))?;
        info!("Loan deleted");
        Ok(())
    }
}
