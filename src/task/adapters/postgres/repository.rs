//! `PostgreSQL` repository implementation for task and subtask storage.

use super::{
    models::{NewSubtaskRow, NewTaskRow, SubtaskRow, TaskRow},
    schema::{subtasks, tasks},
};
use crate::task::{
    domain::{
        PersistedSubtaskData, PersistedTaskData, Subtask, SubtaskDraft, SubtaskId,
        SubtaskPosition, SubtaskUpdate, Task, TaskId, TaskStatus, TaskTitle, plan_reorder,
        sequence_after,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when the pool cannot be
/// created.
pub fn build_pool(database_url: &str, max_size: u32) -> TaskRepositoryResult<TaskPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(TaskRepositoryError::persistence)
}

/// `PostgreSQL`-backed task repository.
///
/// Appends and reorders run in one transaction that row-locks the parent
/// task, so concurrent writers to the same task are serialised.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_task_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_new_task_row(task);

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(tasks::table.filter(tasks::id.eq(row.id)))
                .set((
                    tasks::title.eq(&row.title),
                    tasks::description.eq(&row.description),
                    tasks::status.eq(&row.status),
                ))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(TaskRepositoryError::TaskNotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            // Subtasks go with the task through ON DELETE CASCADE.
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn subtasks_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<Subtask>> {
        self.run_blocking(move |connection| load_subtasks(connection, task_id))
            .await
    }

    async fn find_subtask(&self, id: SubtaskId) -> TaskRepositoryResult<Option<Subtask>> {
        self.run_blocking(move |connection| find_subtask(connection, id))
            .await
    }

    async fn max_position(&self, task_id: TaskId) -> TaskRepositoryResult<Option<SubtaskPosition>> {
        self.run_blocking(move |connection| max_position(connection, task_id))
            .await
    }

    async fn append_subtasks(
        &self,
        task_id: TaskId,
        drafts: Vec<SubtaskDraft>,
    ) -> TaskRepositoryResult<Vec<Subtask>> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                if !lock_task(tx, task_id)? {
                    return Err(TaskRepositoryError::TaskNotFound(task_id));
                }
                let current_max = max_position(tx, task_id)?;
                let sequenced = sequence_after(task_id, current_max, drafts)?;
                let rows = sequenced
                    .iter()
                    .map(to_new_subtask_row)
                    .collect::<TaskRepositoryResult<Vec<_>>>()?;
                if !rows.is_empty() {
                    diesel::insert_into(subtasks::table)
                        .values(&rows)
                        .execute(tx)
                        .map_err(TaskRepositoryError::persistence)?;
                }
                Ok(sequenced)
            })
        })
        .await
    }

    async fn update_subtask(
        &self,
        id: SubtaskId,
        update: SubtaskUpdate,
    ) -> TaskRepositoryResult<Subtask> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let owner = subtasks::table
                    .filter(subtasks::id.eq(id.into_inner()))
                    .select(subtasks::task_id)
                    .first::<uuid::Uuid>(tx)
                    .optional()
                    .map_err(TaskRepositoryError::persistence)?
                    .ok_or(TaskRepositoryError::SubtaskNotFound(id))?;
                let task_id = TaskId::from_uuid(owner);
                if !lock_task(tx, task_id)? {
                    return Err(TaskRepositoryError::SubtaskNotFound(id));
                }

                // Re-read under the task lock so a concurrent reorder is seen.
                let mut subtask = find_subtask(tx, id)?
                    .ok_or(TaskRepositoryError::SubtaskNotFound(id))?;
                let requested_position = update.position();
                if let Some(position) = requested_position {
                    let holder = subtasks::table
                        .filter(subtasks::task_id.eq(owner))
                        .filter(subtasks::order_index.eq(position_to_column(position)?))
                        .filter(subtasks::id.ne(id.into_inner()))
                        .select(subtasks::id)
                        .first::<uuid::Uuid>(tx)
                        .optional()
                        .map_err(TaskRepositoryError::persistence)?;
                    if holder.is_some() {
                        return Err(TaskRepositoryError::PositionTaken { task_id, position });
                    }
                }
                subtask.apply(update)?;

                let row = to_new_subtask_row(&subtask)?;
                diesel::update(subtasks::table.filter(subtasks::id.eq(row.id)))
                    .set((
                        subtasks::title.eq(&row.title),
                        subtasks::description.eq(&row.description),
                        subtasks::status.eq(&row.status),
                    ))
                    .execute(tx)
                    .map_err(TaskRepositoryError::persistence)?;
                if requested_position.is_some() {
                    diesel::update(subtasks::table.filter(subtasks::id.eq(row.id)))
                        .set(subtasks::order_index.eq(row.order_index))
                        .execute(tx)
                        .map_err(TaskRepositoryError::persistence)?;
                }
                Ok(subtask)
            })
        })
        .await
    }

    async fn delete_subtask(&self, id: SubtaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted =
                diesel::delete(subtasks::table.filter(subtasks::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn reorder_subtasks(
        &self,
        task_id: TaskId,
        ordered_ids: &[SubtaskId],
    ) -> TaskRepositoryResult<Vec<Subtask>> {
        let requested = ordered_ids.to_vec();
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                if !lock_task(tx, task_id)? {
                    return Err(TaskRepositoryError::TaskNotFound(task_id));
                }
                let existing = load_subtasks(tx, task_id)?;
                let plan = plan_reorder(&existing, &requested)?;
                for subtask in plan.all() {
                    let order_index = position_to_column(subtask.position())?;
                    diesel::update(
                        subtasks::table.filter(subtasks::id.eq(subtask.id().into_inner())),
                    )
                    .set(subtasks::order_index.eq(order_index))
                    .execute(tx)
                    .map_err(TaskRepositoryError::persistence)?;
                }
                Ok(plan.into_named())
            })
        })
        .await
    }
}

/// Takes a row lock on the task, returning `false` when it does not exist.
fn lock_task(connection: &mut PgConnection, task_id: TaskId) -> TaskRepositoryResult<bool> {
    let locked = tasks::table
        .filter(tasks::id.eq(task_id.into_inner()))
        .select(tasks::id)
        .for_update()
        .first::<uuid::Uuid>(connection)
        .optional()
        .map_err(TaskRepositoryError::persistence)?;
    Ok(locked.is_some())
}

fn find_subtask(
    connection: &mut PgConnection,
    id: SubtaskId,
) -> TaskRepositoryResult<Option<Subtask>> {
    let row = subtasks::table
        .filter(subtasks::id.eq(id.into_inner()))
        .select(SubtaskRow::as_select())
        .first::<SubtaskRow>(connection)
        .optional()
        .map_err(TaskRepositoryError::persistence)?;
    row.map(row_to_subtask).transpose()
}

fn max_position(
    connection: &mut PgConnection,
    task_id: TaskId,
) -> TaskRepositoryResult<Option<SubtaskPosition>> {
    let max_index = subtasks::table
        .filter(subtasks::task_id.eq(task_id.into_inner()))
        .select(diesel::dsl::max(subtasks::order_index))
        .first::<Option<i32>>(connection)
        .map_err(TaskRepositoryError::persistence)?;
    max_index.map(position_from_column).transpose()
}

fn load_subtasks(
    connection: &mut PgConnection,
    task_id: TaskId,
) -> TaskRepositoryResult<Vec<Subtask>> {
    let rows = subtasks::table
        .filter(subtasks::task_id.eq(task_id.into_inner()))
        .order(subtasks::order_index.asc())
        .select(SubtaskRow::as_select())
        .load::<SubtaskRow>(connection)
        .map_err(TaskRepositoryError::persistence)?;
    rows.into_iter().map(row_to_subtask).collect()
}

pub(super) fn to_new_task_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
    }
}

pub(super) fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title: persisted_title,
        description,
        status: persisted_status,
        created_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        status,
        created_at,
    }))
}

pub(super) fn to_new_subtask_row(subtask: &Subtask) -> TaskRepositoryResult<NewSubtaskRow> {
    Ok(NewSubtaskRow {
        id: subtask.id().into_inner(),
        task_id: subtask.task_id().into_inner(),
        title: subtask.title().as_str().to_owned(),
        description: subtask.description().map(str::to_owned),
        status: subtask.status().as_str().to_owned(),
        order_index: position_to_column(subtask.position())?,
    })
}

pub(super) fn row_to_subtask(row: SubtaskRow) -> TaskRepositoryResult<Subtask> {
    let SubtaskRow {
        id,
        task_id,
        title: persisted_title,
        description,
        status: persisted_status,
        order_index,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Subtask::from_persisted(PersistedSubtaskData {
        id: SubtaskId::from_uuid(id),
        task_id: TaskId::from_uuid(task_id),
        title,
        description,
        status,
        position: position_from_column(order_index)?,
    }))
}

pub(super) fn position_to_column(position: SubtaskPosition) -> TaskRepositoryResult<i32> {
    i32::try_from(position.value()).map_err(TaskRepositoryError::persistence)
}

pub(super) fn position_from_column(order_index: i32) -> TaskRepositoryResult<SubtaskPosition> {
    let value = u32::try_from(order_index).map_err(TaskRepositoryError::persistence)?;
    SubtaskPosition::new(value).map_err(TaskRepositoryError::persistence)
}
