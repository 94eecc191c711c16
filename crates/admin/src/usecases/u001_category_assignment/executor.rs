use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use contracts::domain::a001_category::aggregate::{Category, CategoryId};
use contracts::domain::common::EntityRef;
use contracts::domain::common::EntitySummary;
use contracts::usecases::u001_category_assignment::{
    AssignmentSnapshot, CategoryEvent, CategoryOperation, PanelState,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::category_set::CategorySet;
use super::error::CategoryError;
use super::ports::CategoryBackend;
use crate::shared::api::ApiError;

#[derive(Debug, Clone, Default, PartialEq)]
enum CatalogStatus {
    #[default]
    NotLoaded,
    Loaded,
    Failed(String),
}

#[derive(Debug, Default)]
struct AssignmentState {
    current: CategorySet,
    catalog: CategorySet,
    catalog_status: CatalogStatus,
    recommended: CategorySet,
    recommendations: PanelState,
    recommendations_error: Option<String>,
    suggestions: PanelState,
    suggestion_names: Vec<String>,
    pending_assign: HashSet<CategoryId>,
    pending_remove: HashSet<CategoryId>,
}

fn lock_state(state: &Mutex<AssignmentState>) -> MutexGuard<'_, AssignmentState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, Copy)]
enum PendingKind {
    Assign,
    Remove,
}

/// Снимает отметку «запрос выполняется» при любом исходе, в том числе
/// если future операции был сброшен посреди ожидания
struct PendingMark<'a> {
    state: &'a Mutex<AssignmentState>,
    kind: PendingKind,
    id: CategoryId,
}

impl Drop for PendingMark<'_> {
    fn drop(&mut self) {
        let mut state = lock_state(self.state);
        match self.kind {
            PendingKind::Assign => state.pending_assign.remove(&self.id),
            PendingKind::Remove => state.pending_remove.remove(&self.id),
        };
    }
}

#[derive(Debug, Clone, Copy)]
enum Panel {
    Recommendations,
    Suggestions,
}

/// Возвращает панель из `Loading` в `Hidden`, если загрузка не завершилась
struct LoadingReset<'a> {
    state: &'a Mutex<AssignmentState>,
    panel: Panel,
}

impl Drop for LoadingReset<'_> {
    fn drop(&mut self) {
        let mut state = lock_state(self.state);
        let panel = match self.panel {
            Panel::Recommendations => &mut state.recommendations,
            Panel::Suggestions => &mut state.suggestions,
        };
        if panel.is_loading() {
            *panel = PanelState::Hidden;
        }
    }
}

/// Executor для UseCase назначения категорий одной сущности
///
/// Состояние подтверждается сервером до изменения: `current` меняется только
/// после успешного ответа. Все операции принимают `&self`, поэтому запросы
/// по разным категориям могут выполняться одновременно; по одной категории
/// одновременно допускается один assign и один remove.
///
/// Владелец экрана получает изменения через канал `CategoryEvent`.
pub struct CategoryAssignmentExecutor<B> {
    entity: EntityRef,
    backend: Arc<B>,
    state: Mutex<AssignmentState>,
    events: mpsc::UnboundedSender<CategoryEvent>,
    cancel: CancellationToken,
}

impl<B: CategoryBackend> CategoryAssignmentExecutor<B> {
    pub fn new(
        entity: EntityRef,
        categories: Vec<Category>,
        backend: Arc<B>,
    ) -> (Self, mpsc::UnboundedReceiver<CategoryEvent>) {
        Self::new_with_token(entity, categories, backend, CancellationToken::new())
    }

    /// Создать исполнителя, привязанного к токену отмены владельца
    /// (например, сессии экрана). Отмена токена останавливает все запросы.
    pub fn new_with_token(
        entity: EntityRef,
        categories: Vec<Category>,
        backend: Arc<B>,
        cancel: CancellationToken,
    ) -> (Self, mpsc::UnboundedReceiver<CategoryEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let state = AssignmentState {
            current: categories.into_iter().collect(),
            ..Default::default()
        };
        let executor = Self {
            entity,
            backend,
            state: Mutex::new(state),
            events,
            cancel,
        };
        (executor, receiver)
    }

    /// Загрузить карточку сущности и каталог (аналог монтирования экрана)
    ///
    /// Ошибка каталога не прерывает открытие: она записывается в состояние,
    /// а добавление категорий становится недоступным.
    pub async fn open(
        entity: EntityRef,
        backend: Arc<B>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<CategoryEvent>, EntitySummary), CategoryError> {
        let summary = backend.fetch_entity(&entity).await.map_err(|e| {
            tracing::error!("Failed to load {}: {}", entity, e);
            CategoryError::from(e)
        })?;
        tracing::info!(
            "Opened {} '{}' with {} categories",
            entity,
            summary.name,
            summary.categories.len()
        );

        let (executor, receiver) = Self::new(entity, summary.categories.clone(), backend);
        if let Err(e) = executor.load_catalog().await {
            tracing::warn!("{}: catalog unavailable: {}", executor.entity, e);
        }
        Ok((executor, receiver, summary))
    }

    // ========================================================================
    // Операции
    // ========================================================================

    /// Загрузить полный каталог категорий
    pub async fn load_catalog(&self) -> Result<(), CategoryError> {
        self.ensure_open()?;

        match self.guarded(self.backend.fetch_all()).await {
            Ok(categories) => {
                let mut state = self.lock();
                state.catalog = categories.into_iter().collect();
                state.catalog_status = CatalogStatus::Loaded;
                tracing::info!("{}: catalog loaded ({} categories)", self.entity, state.catalog.len());
                Ok(())
            }
            Err(e) => {
                if !matches!(e, CategoryError::Cancelled) {
                    let message = CategoryOperation::LoadCatalog.failure_message(self.entity.kind());
                    self.lock().catalog_status = CatalogStatus::Failed(message);
                }
                self.report(CategoryOperation::LoadCatalog, &e);
                Err(e)
            }
        }
    }

    /// Привязать категорию к сущности
    ///
    /// Любой отказ, включая локальные проверки, уходит в канал как `Failed`.
    pub async fn add_category(&self, category: Category) -> Result<(), CategoryError> {
        let result = self.assign_category(category).await;
        if let Err(e) = &result {
            self.report(CategoryOperation::Assign, e);
        }
        result
    }

    async fn assign_category(&self, category: Category) -> Result<(), CategoryError> {
        self.ensure_open()?;
        if category.id.is_blank() {
            return Err(CategoryError::Validation("category id is empty".to_string()));
        }

        let _pending = {
            let mut state = self.lock();
            if state.current.contains(&category.id) {
                return Err(CategoryError::AlreadyAssigned(category.id));
            }
            if !state.pending_assign.insert(category.id.clone()) {
                tracing::debug!("{}: assign of {} already in flight", self.entity, category.id);
                return Err(CategoryError::InFlight(category.id));
            }
            PendingMark {
                state: &self.state,
                kind: PendingKind::Assign,
                id: category.id.clone(),
            }
        };

        self.guarded(self.backend.assign(&self.entity, &category.id))
            .await?;

        let categories = {
            let mut state = self.lock();
            state.current.insert(category.clone());
            state.recommended.remove(&category.id);
            state.current.to_vec()
        };
        tracing::info!(
            "{}: category '{}' ({}) assigned",
            self.entity,
            category.name,
            category.id
        );
        self.emit(CategoryEvent::CategoriesChanged {
            entity: self.entity.clone(),
            categories,
        });
        Ok(())
    }

    /// Отвязать категорию от сущности
    pub async fn remove_category(&self, category_id: &CategoryId) -> Result<(), CategoryError> {
        let result = self.unassign_category(category_id).await;
        if let Err(e) = &result {
            self.report(CategoryOperation::Unassign, e);
        }
        result
    }

    async fn unassign_category(&self, category_id: &CategoryId) -> Result<(), CategoryError> {
        self.ensure_open()?;

        let _pending = {
            let mut state = self.lock();
            if !state.current.contains(category_id) {
                return Err(CategoryError::NotAssigned(category_id.clone()));
            }
            if !state.pending_remove.insert(category_id.clone()) {
                tracing::debug!("{}: removal of {} already in flight", self.entity, category_id);
                return Err(CategoryError::InFlight(category_id.clone()));
            }
            PendingMark {
                state: &self.state,
                kind: PendingKind::Remove,
                id: category_id.clone(),
            }
        };

        self.guarded(self.backend.unassign(&self.entity, category_id))
            .await?;

        let categories = {
            let mut state = self.lock();
            state.current.remove(category_id);
            state.current.to_vec()
        };
        tracing::info!("{}: category {} removed", self.entity, category_id);
        self.emit(CategoryEvent::CategoriesChanged {
            entity: self.entity.clone(),
            categories,
        });
        Ok(())
    }

    /// Показать или скрыть рекомендованные категории
    ///
    /// Скрытие очищает список без запроса к серверу. Пока загрузка идёт,
    /// повторное переключение отклоняется.
    pub async fn toggle_recommendations(&self) -> Result<PanelState, CategoryError> {
        self.ensure_open()?;

        {
            let mut state = self.lock();
            match state.recommendations {
                PanelState::Loading => {
                    tracing::debug!("{}: recommendations still loading", self.entity);
                    return Err(CategoryError::RecommendationsLoading);
                }
                PanelState::Shown => {
                    state.recommendations = PanelState::Hidden;
                    state.recommended.clear();
                    return Ok(PanelState::Hidden);
                }
                PanelState::Hidden => {
                    state.recommendations = PanelState::Loading;
                    state.recommendations_error = None;
                }
            }
        }
        let _reset = LoadingReset {
            state: &self.state,
            panel: Panel::Recommendations,
        };

        match self
            .guarded(self.backend.fetch_recommendations(&self.entity))
            .await
        {
            Ok(categories) => {
                let mut state = self.lock();
                let mut recommended: CategorySet = categories.into_iter().collect();
                recommended.retain_absent_from(&state.current);
                tracing::info!("{}: {} recommended categories", self.entity, recommended.len());
                state.recommended = recommended;
                state.recommendations = PanelState::Shown;
                Ok(PanelState::Shown)
            }
            Err(e) => {
                {
                    let mut state = self.lock();
                    state.recommendations = PanelState::Hidden;
                    if !matches!(e, CategoryError::Cancelled) {
                        state.recommendations_error = Some(
                            CategoryOperation::Recommendations.failure_message(self.entity.kind()),
                        );
                    }
                }
                self.report(CategoryOperation::Recommendations, &e);
                Err(e)
            }
        }
    }

    /// Принять рекомендацию. Из списка рекомендаций она уходит только при
    /// успешной привязке, чтобы после ошибки можно было повторить.
    pub async fn accept_recommendation(&self, category: Category) -> Result<(), CategoryError> {
        self.ensure_open()?;
        if !self.lock().recommended.contains(&category.id) {
            let e = CategoryError::NotRecommended(category.id);
            self.report(CategoryOperation::Assign, &e);
            return Err(e);
        }
        self.add_category(category).await
    }

    /// Показать или скрыть подсказки названий категорий
    ///
    /// Для пустого запроса панель показывается без обращения к серверу.
    pub async fn toggle_suggestions(&self, query: &str) -> Result<PanelState, CategoryError> {
        self.ensure_open()?;
        let query = query.trim();

        {
            let mut state = self.lock();
            match state.suggestions {
                PanelState::Loading => {
                    tracing::debug!("{}: suggestions still loading", self.entity);
                    return Err(CategoryError::SuggestionsLoading);
                }
                PanelState::Shown => {
                    state.suggestions = PanelState::Hidden;
                    state.suggestion_names.clear();
                    return Ok(PanelState::Hidden);
                }
                PanelState::Hidden if query.is_empty() => {
                    state.suggestion_names.clear();
                    state.suggestions = PanelState::Shown;
                    return Ok(PanelState::Shown);
                }
                PanelState::Hidden => state.suggestions = PanelState::Loading,
            }
        }
        let _reset = LoadingReset {
            state: &self.state,
            panel: Panel::Suggestions,
        };

        match self
            .guarded(self.backend.fetch_suggestions(&self.entity, query))
            .await
        {
            Ok(names) => {
                let mut seen = HashSet::new();
                let names: Vec<String> = names
                    .into_iter()
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty() && seen.insert(n.clone()))
                    .collect();
                tracing::info!("{}: {} category suggestions", self.entity, names.len());
                let mut state = self.lock();
                state.suggestion_names = names;
                state.suggestions = PanelState::Shown;
                Ok(PanelState::Shown)
            }
            Err(e) => {
                self.lock().suggestions = PanelState::Hidden;
                self.report(CategoryOperation::Suggestions, &e);
                Err(e)
            }
        }
    }

    /// Создать категорию из подсказки и сразу привязать её
    ///
    /// При ошибке создания (в том числе конфликте имени) привязка не
    /// выполняется. Возвращает созданную категорию.
    pub async fn create_and_assign_from_suggestion(
        &self,
        name: &str,
    ) -> Result<Category, CategoryError> {
        self.ensure_open()?;
        let name = name.trim();
        if name.is_empty() {
            let e = CategoryError::Validation("Category name is required".to_string());
            self.report(CategoryOperation::CreateCategory, &e);
            return Err(e);
        }

        let created = match self.guarded(self.backend.create_category(name)).await {
            Ok(category) => category,
            Err(e) => {
                self.report(CategoryOperation::CreateCategory, &e);
                return Err(e);
            }
        };

        {
            let mut state = self.lock();
            state.catalog.insert(created.clone());
            state.suggestion_names.retain(|n| n != name);
        }
        tracing::info!(
            "{}: category '{}' ({}) created from suggestion",
            self.entity,
            created.name,
            created.id
        );
        self.emit(CategoryEvent::CategoryCreated {
            category: created.clone(),
        });

        // сервер может вернуть уже существующую и уже назначенную категорию
        match self.assign_category(created.clone()).await {
            Ok(()) | Err(CategoryError::AlreadyAssigned(_)) => Ok(created),
            Err(e) => {
                self.report(CategoryOperation::Assign, &e);
                Err(e)
            }
        }
    }

    /// Владелец передаёт свой актуальный список категорий сущности
    pub fn replace_current(&self, categories: Vec<Category>) {
        let mut state = self.lock();
        state.current = categories.into_iter().collect();
        let current = std::mem::take(&mut state.current);
        state.recommended.retain_absent_from(&current);
        state.current = current;
    }

    /// Отменить все выполняющиеся запросы; ответы больше не применяются
    pub fn shutdown(&self) {
        if !self.cancel.is_cancelled() {
            tracing::debug!("{}: category editor closed", self.entity);
            self.cancel.cancel();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    // ========================================================================
    // Чтение состояния
    // ========================================================================

    pub fn current(&self) -> Vec<Category> {
        self.lock().current.to_vec()
    }

    /// Каталог минус уже назначенные категории, в порядке каталога
    pub fn available(&self) -> Vec<Category> {
        let state = self.lock();
        state.catalog.difference(&state.current)
    }

    pub fn recommended(&self) -> Vec<Category> {
        self.lock().recommended.to_vec()
    }

    pub fn suggestion_names(&self) -> Vec<String> {
        self.lock().suggestion_names.clone()
    }

    pub fn is_assigning(&self, id: &CategoryId) -> bool {
        self.lock().pending_assign.contains(id)
    }

    pub fn is_removing(&self, id: &CategoryId) -> bool {
        self.lock().pending_remove.contains(id)
    }

    /// Добавление из каталога доступно, когда каталог загружен и есть что добавить
    pub fn can_add(&self) -> bool {
        let state = self.lock();
        Self::can_add_from(&state)
    }

    pub fn snapshot(&self) -> AssignmentSnapshot {
        let state = self.lock();
        let mut assigning: Vec<CategoryId> = state.pending_assign.iter().cloned().collect();
        let mut removing: Vec<CategoryId> = state.pending_remove.iter().cloned().collect();
        assigning.sort();
        removing.sort();

        AssignmentSnapshot {
            entity: self.entity.clone(),
            current: state.current.to_vec(),
            available: state.catalog.difference(&state.current),
            recommended: state.recommended.to_vec(),
            recommendations: state.recommendations,
            suggestions: state.suggestions,
            suggestion_names: state.suggestion_names.clone(),
            catalog_error: match &state.catalog_status {
                CatalogStatus::Failed(message) => Some(message.clone()),
                _ => None,
            },
            recommendations_error: state.recommendations_error.clone(),
            assigning,
            removing,
            can_add: Self::can_add_from(&state),
        }
    }

    // ========================================================================
    // Внутреннее
    // ========================================================================

    fn can_add_from(state: &AssignmentState) -> bool {
        state.catalog_status == CatalogStatus::Loaded
            && state
                .catalog
                .iter()
                .any(|c| !state.current.contains(&c.id))
    }

    fn lock(&self) -> MutexGuard<'_, AssignmentState> {
        lock_state(&self.state)
    }

    fn ensure_open(&self) -> Result<(), CategoryError> {
        if self.cancel.is_cancelled() {
            return Err(CategoryError::Cancelled);
        }
        Ok(())
    }

    /// Выполнить запрос с учётом отмены. Ответ, пришедший после отмены,
    /// отбрасывается.
    async fn guarded<T>(
        &self,
        request: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, CategoryError> {
        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(CategoryError::Cancelled),
            result = request => result,
        };
        self.ensure_open()?;
        result.map_err(CategoryError::from)
    }

    fn emit(&self, event: CategoryEvent) {
        if self.events.send(event).is_err() {
            tracing::trace!("{}: event receiver dropped", self.entity);
        }
    }

    fn report(&self, operation: CategoryOperation, error: &CategoryError) {
        if matches!(error, CategoryError::Cancelled) {
            tracing::debug!("{}: {:?} cancelled", self.entity, operation);
            return;
        }
        let message = operation.failure_message(self.entity.kind());
        tracing::warn!("{}: {} ({})", self.entity, message, error);
        self.emit(CategoryEvent::Failed { operation, message });
    }
}

impl<B> Drop for CategoryAssignmentExecutor<B> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
