//! Rotating index over an ordered list of slides.
//!
//! [`CarouselController`] is the pure state machine. [`AutoAdvance`] is the
//! repeating timer that ticks it, and [`Carousel`] ties the two to a mounted
//! lifetime: the timer exists only while there is more than one slide and is
//! cancelled on unmount or drop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Index state machine over `slides`. `index` is always `< len()` when non-empty.
#[derive(Debug, Clone)]
pub struct CarouselController<T> {
    slides: Vec<T>,
    index: usize,
}

impl<T> CarouselController<T> {
    pub fn new(slides: Vec<T>) -> Self {
        Self { slides, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn slides(&self) -> &[T] {
        &self.slides
    }

    /// `None` only for the empty carousel
    pub fn current(&self) -> Option<&T> {
        self.slides.get(self.index)
    }

    /// Previous/next controls are only meaningful with two or more slides
    pub fn controls_enabled(&self) -> bool {
        self.len() > 1
    }

    pub fn next(&mut self) -> usize {
        if !self.is_empty() {
            self.index = (self.index + 1) % self.len();
        }
        self.index
    }

    pub fn previous(&mut self) -> usize {
        if !self.is_empty() {
            let n = self.len();
            self.index = (self.index + n - 1) % n;
        }
        self.index
    }

    /// Jump to `k`. Out-of-range targets are ignored and return false.
    pub fn go_to(&mut self, k: usize) -> bool {
        if k >= self.len() {
            return false;
        }
        self.index = k;
        true
    }

    /// Timer transition: advances only when there is something to rotate
    pub fn tick(&mut self) -> bool {
        if !self.controls_enabled() {
            return false;
        }
        self.next();
        true
    }

    /// Swap the slide list and restart from the first slide
    pub fn replace_slides(&mut self, slides: Vec<T>) {
        self.slides = slides;
        self.index = 0;
    }

    pub fn view(&self) -> CarouselView {
        CarouselView {
            index: self.index,
            count: self.len(),
            controls_enabled: self.controls_enabled(),
        }
    }
}

/// Snapshot handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselView {
    pub index: usize,
    pub count: usize,
    pub controls_enabled: bool,
}

type SharedController<T> = Arc<Mutex<CarouselController<T>>>;

fn lock<T>(state: &Mutex<CarouselController<T>>) -> MutexGuard<'_, CarouselController<T>> {
    // transitions cannot leave the index out of range, so a poisoned state is still usable
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Repeating tick task. Holds only a weak reference to the state it drives.
pub struct AutoAdvance {
    live: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl AutoAdvance {
    /// Spawn on the current tokio runtime; the first tick fires after one `period`.
    pub fn spawn<T>(state: Weak<Mutex<CarouselController<T>>>, period: Duration) -> Self
    where
        T: Send + 'static,
    {
        let live = Arc::new(AtomicBool::new(true));
        let flag = live.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let Some(state) = state.upgrade() else {
                    tracing::debug!("Carousel state dropped, stopping auto-advance");
                    break;
                };
                let mut controller = lock(&state);
                // checked under the lock so a cancel that wins the lock is final
                if !flag.load(Ordering::Acquire) {
                    break;
                }
                controller.tick();
            }
        });

        Self { live, handle }
    }

    /// Stop the timer. No tick is applied after this returns: a tick already
    /// waiting on the state lock sees the cleared flag and exits.
    pub fn cancel(&self) {
        self.live.store(false, Ordering::Release);
        self.handle.abort();
    }

    pub fn is_running(&self) -> bool {
        self.live.load(Ordering::Acquire) && !self.handle.is_finished()
    }
}

impl Drop for AutoAdvance {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A mounted carousel: controller plus at most one auto-advance timer
pub struct Carousel<T: Send + 'static> {
    state: SharedController<T>,
    period: Duration,
    timer: Option<AutoAdvance>,
}

impl<T: Send + 'static> Carousel<T> {
    /// Mount at index 0. Must be called inside a tokio runtime.
    pub fn mount(slides: Vec<T>, period: Duration) -> Self {
        let mut carousel = Self {
            state: Arc::new(Mutex::new(CarouselController::new(slides))),
            period,
            timer: None,
        };
        carousel.sync_timer();
        carousel
    }

    /// Keep exactly one timer while there are two or more slides, none otherwise
    fn sync_timer(&mut self) {
        let wants_timer = lock(&self.state).controls_enabled();

        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        if wants_timer {
            self.timer = Some(AutoAdvance::spawn(Arc::downgrade(&self.state), self.period));
        }
    }

    pub fn set_slides(&mut self, slides: Vec<T>) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        lock(&self.state).replace_slides(slides);
        self.sync_timer();
    }

    pub fn next(&self) -> usize {
        lock(&self.state).next()
    }

    pub fn previous(&self) -> usize {
        lock(&self.state).previous()
    }

    pub fn go_to(&self, k: usize) -> bool {
        lock(&self.state).go_to(k)
    }

    pub fn index(&self) -> usize {
        lock(&self.state).index()
    }

    pub fn view(&self) -> CarouselView {
        lock(&self.state).view()
    }

    pub fn is_autoplaying(&self) -> bool {
        self.timer.as_ref().is_some_and(AutoAdvance::is_running)
    }

    pub fn current(&self) -> Option<T>
    where
        T: Clone,
    {
        lock(&self.state).current().cloned()
    }

    /// Tear down: cancels the timer before returning the final view
    pub fn unmount(mut self) -> CarouselView {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_secs(5);

    /// Sleep just past `ticks` periods so the timer task has run
    async fn wait_ticks(ticks: u32) {
        tokio::time::sleep(PERIOD * ticks + Duration::from_millis(100)).await;
    }

    #[test]
    fn test_next_wraps_after_full_cycle() {
        for n in 1..=5 {
            let mut carousel = CarouselController::new((0..n).collect::<Vec<_>>());
            for _ in 0..n {
                carousel.next();
            }
            assert_eq!(carousel.index(), 0);
        }
    }

    #[test]
    fn test_previous_from_start_goes_to_last() {
        let mut carousel = CarouselController::new(vec!['a', 'b', 'c', 'd']);
        assert_eq!(carousel.previous(), 3);
        assert_eq!(carousel.current(), Some(&'d'));
        assert_eq!(carousel.previous(), 2);
    }

    #[test]
    fn test_three_slides_next_sequence() {
        let mut carousel = CarouselController::new(vec!["one", "two", "three"]);
        let seen: Vec<usize> = std::iter::once(carousel.index())
            .chain((0..3).map(|_| carousel.next()))
            .collect();
        assert_eq!(seen, [0, 1, 2, 0]);
    }

    #[test]
    fn test_go_to_rejects_out_of_range() {
        let mut carousel = CarouselController::new(vec![1, 2, 3]);
        assert!(carousel.go_to(2));
        assert!(!carousel.go_to(3));
        assert!(!carousel.go_to(usize::MAX));
        assert_eq!(carousel.index(), 2);

        let mut empty = CarouselController::<u8>::new(Vec::new());
        assert!(!empty.go_to(0));
    }

    #[test]
    fn test_single_and_empty_are_inert() {
        let mut single = CarouselController::new(vec!["only"]);
        assert!(!single.controls_enabled());
        assert!(!single.tick());
        single.next();
        single.previous();
        assert_eq!(single.index(), 0);

        let mut empty = CarouselController::<&str>::new(Vec::new());
        assert_eq!(empty.next(), 0);
        assert_eq!(empty.previous(), 0);
        assert!(empty.current().is_none());
        assert_eq!(
            empty.view(),
            CarouselView {
                index: 0,
                count: 0,
                controls_enabled: false
            }
        );
    }

    #[test]
    fn test_replace_slides_resets_index() {
        let mut carousel = CarouselController::new(vec![1, 2, 3]);
        carousel.go_to(2);
        carousel.replace_slides(vec![7, 8]);
        assert_eq!(carousel.index(), 0);
        assert_eq!(carousel.current(), Some(&7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_advances_every_period() {
        let carousel = Carousel::mount(vec!["a", "b", "c"], PERIOD);
        assert!(carousel.is_autoplaying());

        // sample halfway between ticks so no check shares an instant with one
        tokio::time::sleep(PERIOD / 2).await;
        assert_eq!(carousel.index(), 0);

        for expected in [1, 2, 0, 1] {
            tokio::time::sleep(PERIOD).await;
            assert_eq!(carousel.index(), expected);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_timer_for_single_or_empty() {
        let single = Carousel::mount(vec!["only"], PERIOD);
        let empty = Carousel::<&str>::mount(Vec::new(), PERIOD);
        assert!(!single.is_autoplaying());
        assert!(!empty.is_autoplaying());

        wait_ticks(4).await;
        assert_eq!(single.index(), 0);
        assert_eq!(empty.view().count, 0);
        assert!(empty.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shrinking_to_one_slide_stops_timer() {
        let mut carousel = Carousel::mount(vec![1, 2, 3], PERIOD);
        wait_ticks(1).await;
        assert_eq!(carousel.index(), 1);

        carousel.set_slides(vec![9]);
        assert!(!carousel.is_autoplaying());
        wait_ticks(3).await;
        assert_eq!(carousel.index(), 0);

        carousel.set_slides(vec![1, 2]);
        assert!(carousel.is_autoplaying());
        wait_ticks(1).await;
        assert_eq!(carousel.index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_ticks_after_cancel() {
        let state = Arc::new(Mutex::new(CarouselController::new(vec![1, 2, 3])));
        let timer = AutoAdvance::spawn(Arc::downgrade(&state), PERIOD);

        wait_ticks(1).await;
        assert_eq!(lock(&state).index(), 1);

        timer.cancel();
        assert!(!timer.is_running());
        wait_ticks(5).await;
        assert_eq!(lock(&state).index(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_cancel_discards_tick_waiting_on_lock() {
        let state = Arc::new(Mutex::new(CarouselController::new(vec![1, 2, 3])));
        let timer = AutoAdvance::spawn(Arc::downgrade(&state), Duration::from_millis(20));

        {
            // the first tick fires while the lock is held and has to wait for it
            let guard = lock(&state);
            std::thread::sleep(Duration::from_millis(150));
            timer.cancel();
            drop(guard);
        }

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(lock(&state).index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_slides_restarts_at_first_slide() {
        let mut carousel = Carousel::mount(vec![1, 2, 3], PERIOD);
        tokio::time::sleep(PERIOD + PERIOD / 2).await;
        assert_eq!(carousel.index(), 1);

        carousel.set_slides(vec![4, 5, 6]);
        assert_eq!(carousel.index(), 0);
        tokio::task::yield_now().await;
        assert_eq!(carousel.index(), 0);

        tokio::time::sleep(PERIOD / 2).await;
        assert_eq!(carousel.index(), 0);
        tokio::time::sleep(PERIOD).await;
        assert_eq!(carousel.index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_timer_cancels_it() {
        let state = Arc::new(Mutex::new(CarouselController::new(vec![1, 2])));
        drop(AutoAdvance::spawn(Arc::downgrade(&state), PERIOD));

        wait_ticks(3).await;
        assert_eq!(lock(&state).index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_stops_when_state_is_gone() {
        let state = Arc::new(Mutex::new(CarouselController::new(vec![1, 2])));
        let timer = AutoAdvance::spawn(Arc::downgrade(&state), PERIOD);
        drop(state);

        wait_ticks(1).await;
        assert!(!timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_stops_timer_and_manual_navigation_still_works() {
        let carousel = Carousel::mount(vec!['x', 'y', 'z'], PERIOD);
        assert!(carousel.go_to(2));
        assert_eq!(carousel.next(), 0);
        assert_eq!(carousel.previous(), 2);
        assert_eq!(carousel.current(), Some('z'));

        let view = carousel.unmount();
        assert_eq!(view.index, 2);
        assert!(view.controls_enabled);
    }
}
