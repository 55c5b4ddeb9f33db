use crate::types::{Task, TaskError};

/// Tasks in canonical (insertion) order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn get(&self, index: usize) -> Result<&Task, TaskError> {
        let len = self.tasks.len();
        self.tasks.get(index).ok_or_else(|| out_of_range(index, len))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Task, TaskError> {
        let len = self.tasks.len();
        self.tasks.get_mut(index).ok_or_else(|| out_of_range(index, len))
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Task, TaskError> {
        if index >= self.tasks.len() {
            return Err(out_of_range(index, self.tasks.len()));
        }
        Ok(self.tasks.remove(index))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Owned copy of the current contents, detached from later mutation.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Display order. Stable, so tasks with equal times keep canonical order.
    pub fn chronological(&self) -> Vec<&Task> {
        let mut sorted: Vec<&Task> = self.tasks.iter().collect();
        sorted.sort_by(|a, b| a.chronological_cmp(b));
        sorted
    }

    /// Maps a 1-based task number typed by the user to a 0-based position.
    pub fn resolve(&self, task_number: &str) -> Result<usize, TaskError> {
        let number: i64 = task_number
            .trim()
            .parse()
            .map_err(|_| TaskError::NotANumber(task_number.to_string()))?;
        let index = number.saturating_sub(1);

        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.tasks.len())
            .ok_or(TaskError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            })
    }
}

fn out_of_range(index: usize, len: usize) -> TaskError {
    TaskError::IndexOutOfRange {
        index: i64::try_from(index).unwrap_or(i64::MAX),
        len,
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        TaskList {
            tasks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
