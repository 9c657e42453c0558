//! Animation collaborator boundary.
//!
//! The page's animation runtime lives in the browser. The renderer only tells
//! it which elements to animate and when trigger positions must be
//! recomputed; [`DirectiveAnimator`] records those calls so the page can hand
//! them to the runtime.

use std::sync::Mutex;

use serde::Serialize;

/// Scroll-gated entrance animation: from an offset, transparent state to rest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntranceAnimation {
    /// Initial opacity.
    pub from_opacity: f64,
    /// Initial vertical offset in pixels.
    pub from_y: f64,
    /// Duration of each element's animation in seconds.
    pub duration: f64,
    /// Delay between consecutive elements in seconds.
    pub stagger: f64,
    /// Scroll position at which the animation starts.
    pub start: String,
}

impl Default for EntranceAnimation {
    fn default() -> Self {
        Self {
            from_opacity: 0.0,
            from_y: 30.0,
            duration: 1.0,
            stagger: 0.15,
            start: "top 80%".to_string(),
        }
    }
}

/// A recorded animation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnimationDirective {
    /// Animate elements matching `selector` inside the trigger container.
    Entrance {
        trigger: String,
        selector: String,
        #[serde(flatten)]
        animation: EntranceAnimation,
    },
    /// Recompute scroll trigger positions after a DOM change.
    RefreshTriggers,
}

/// Receiver of animation calls.
pub trait Animator: Send + Sync {
    /// Animate the elements matching `selector` when `trigger_id` scrolls into
    /// view.
    fn animate_entrance(&self, trigger_id: &str, selector: &str, animation: &EntranceAnimation);

    /// Recompute trigger positions. Must follow every DOM mutation.
    fn refresh_triggers(&self);

    /// Drop animations registered for content that has been replaced.
    fn clear(&self);
}

/// Animator that records directives for the page runtime.
#[derive(Debug, Default)]
pub struct DirectiveAnimator {
    directives: Mutex<Vec<AnimationDirective>>,
}

impl DirectiveAnimator {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Directives recorded so far.
    pub fn directives(&self) -> Vec<AnimationDirective> {
        self.lock().clone()
    }

    /// Directives as a JSON array for the page runtime.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&*self.lock()).unwrap_or_else(|_| "[]".to_string())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<AnimationDirective>> {
        self.directives
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Animator for DirectiveAnimator {
    fn animate_entrance(&self, trigger_id: &str, selector: &str, animation: &EntranceAnimation) {
        self.lock().push(AnimationDirective::Entrance {
            trigger: trigger_id.to_string(),
            selector: selector.to_string(),
            animation: animation.clone(),
        });
    }

    fn refresh_triggers(&self) {
        self.lock().push(AnimationDirective::RefreshTriggers);
    }

    fn clear(&self) {
        self.lock().clear();
    }
}
