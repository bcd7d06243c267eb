use catalog::CityGuide;
use shared::{
    domain::CommunityPost,
    protocol::{FeedView, PostView, Reaction, ReminderView},
};

use crate::{format, PlannerError};

pub const MAX_COMMENT_CHARS: usize = 500;

/// A session's copy of a city's community feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    posts: Vec<CommunityPost>,
    reminder_shown: bool,
}

impl Feed {
    pub fn seeded(guide: &CityGuide) -> Self {
        Self {
            posts: guide.community.clone(),
            reminder_shown: false,
        }
    }

    pub fn posts(&self) -> &[CommunityPost] {
        &self.posts
    }

    fn post_mut(&mut self, index: usize) -> Result<&mut CommunityPost, PlannerError> {
        self.posts
            .get_mut(index)
            .ok_or(PlannerError::UnknownPost(index))
    }

    pub fn react(&mut self, index: usize, reaction: Reaction) -> Result<(), PlannerError> {
        let post = self.post_mut(index)?;
        let counter = match reaction {
            Reaction::Like => &mut post.likes,
            Reaction::Useful => &mut post.useful,
            Reaction::NotUseful => &mut post.not_useful,
        };
        *counter = counter.saturating_add(1);
        Ok(())
    }

    pub fn comment(&mut self, index: usize, text: &str) -> Result<(), PlannerError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PlannerError::EmptyComment);
        }
        if text.chars().count() > MAX_COMMENT_CHARS {
            return Err(PlannerError::CommentTooLong(MAX_COMMENT_CHARS));
        }
        self.post_mut(index)?.comments.push(text.to_string());
        Ok(())
    }

    /// The trip reminder is shown once per city per session.
    pub fn take_reminder(&mut self, guide: &CityGuide) -> Option<ReminderView> {
        if self.reminder_shown {
            return None;
        }
        self.reminder_shown = true;
        Some(ReminderView {
            destination: guide.name.clone(),
            days_left: guide.reminder.days_left,
            temperature_range: guide.reminder.temperature_range.clone(),
            packing: guide.reminder.packing.clone(),
        })
    }

    pub fn post_views(&self) -> Vec<PostView> {
        self.posts
            .iter()
            .enumerate()
            .map(|(index, post)| PostView {
                index,
                author: post.author.clone(),
                content: post.content.clone(),
                kind: post.kind,
                likes: post.likes,
                useful: post.useful,
                not_useful: post.not_useful,
                comments: post.comments.clone(),
                posted: format::posted_ago(post.posted_hours_ago),
            })
            .collect()
    }
}

/// Feed page for `guide`, consuming the one-time reminder if still pending.
pub fn feed_view(guide: &CityGuide, feed: &mut Feed) -> FeedView {
    FeedView {
        city: guide.id.clone(),
        reminder: feed.take_reminder(guide),
        posts: feed.post_views(),
    }
}

#[cfg(test)]
#[path = "tests/community_tests.rs"]
mod tests;
