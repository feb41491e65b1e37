use crate::catalog::{self, Catalog};
use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::page::Page;
use crate::view;
use async_channel::Receiver;
use carousel::{Carousel, InputEvent, Language};
use parking_lot::RwLock;
use std::ops::ControlFlow;
use tokio::time::{Duration, Instant};

pub struct App {
    config: Config,
    carousel: Carousel,
    page: Page,
    language: Language,
    tables: &'static RwLock<::config::Config>,
    started: Instant,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self::with_tables(config, catalog::shared_tables())
    }

    /// An app translating captions through `tables` instead of the process-wide ones.
    pub fn with_tables(config: Config, tables: &'static RwLock<::config::Config>) -> Self {
        let language = config.language.unwrap_or_else(catalog::system_language);
        let carousel = Carousel::mount(
            config.carousel.as_ref(),
            &Catalog::with_tables(language, tables),
            config.options(),
        );
        if let Some(id) = carousel.id() {
            log::info!("Carousel '{}' mounted in {}", id, language);
        }

        Self {
            page: Page::new(config.viewport),
            config,
            carousel,
            language,
            tables,
            started: Instant::now(),
        }
    }

    fn catalog(&self, language: Language) -> Catalog {
        Catalog::with_tables(language, self.tables)
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    pub fn update(&mut self, event: AppEvent, now_ms: u64) -> ControlFlow<()> {
        match event {
            AppEvent::Input(input) => {
                let verdict = self.carousel.handle(input, now_ms, &self.page);
                if let InputEvent::Wheel { dy, .. } | InputEvent::CarouselWheel { dy, .. } = input
                    && !verdict.consumed
                {
                    self.scroll(dy);
                }
            }
            AppEvent::Scroll(dy) => self.scroll(dy),
            AppEvent::Language(language) => self.set_language(language),
            AppEvent::Reveal => self.carousel.reveal(now_ms),
            AppEvent::ConfigReload => self.reload(now_ms),
            AppEvent::Quit => return ControlFlow::Break(()),
        }
        self.flush();
        ControlFlow::Continue(())
    }

    pub fn tick(&mut self, now_ms: u64) {
        self.carousel.advance(now_ms);
        self.flush();
    }

    fn scroll(&mut self, dy: f64) {
        let progress = self.page.scroll_by(dy);
        log::debug!("Scroll progress {:.0}%", progress * 100.0);
    }

    fn set_language(&mut self, language: Language) {
        self.language = language;
        self.carousel.relabel(&self.catalog(language));
        log::info!("Language set to {}", language);
    }

    fn reload(&mut self, now_ms: u64) {
        match config::load_config() {
            Ok(new_config) => {
                if let Err(e) = catalog::refresh_cache() {
                    log::error!("Failed to reload translations: {}", e);
                }
                self.apply_config(new_config, now_ms);
                log::info!("Configuration reloaded");
            }
            Err(e) => log::error!("Failed to reload config: {}", e),
        }
    }

    /// Adopts a new configuration. The carousel is remounted only when its markup or tuning
    /// changed; otherwise its captions are re-read in place.
    pub fn apply_config(&mut self, new_config: Config, now_ms: u64) {
        let language = new_config
            .language
            .unwrap_or_else(catalog::system_language);
        self.page.set_geometry(new_config.viewport);

        if new_config.carousel != self.config.carousel
            || new_config.options() != self.config.options()
        {
            self.carousel.teardown();
            self.carousel = Carousel::mount(
                new_config.carousel.as_ref(),
                &self.catalog(language),
                new_config.options(),
            );
            self.carousel.reveal(now_ms);
        } else {
            self.carousel.relabel(&self.catalog(language));
        }

        self.language = language;
        self.config = new_config;
    }

    fn flush(&mut self) {
        let mutations = self.carousel.take_mutations();
        for m in &mutations {
            log::debug!("{}", view::describe(m));
        }
        if !mutations.is_empty()
            && self.carousel.is_quiescent()
            && let Some(stage) = self.carousel.stage()
        {
            log::info!("{}", view::render(stage));
        }
    }

    /// Single-threaded page loop: input from `rx`, deferred carousel steps from a timer set
    /// to the carousel's next deadline.
    pub async fn run(mut self, rx: Receiver<AppEvent>) {
        let now = self.now_ms();
        self.carousel.reveal(now);
        self.flush();

        loop {
            let wake = self
                .carousel
                .next_deadline()
                .map(|ms| self.started + Duration::from_millis(ms));
            let timer = async move {
                match wake {
                    Some(at) => tokio::time::sleep_until(at).await,
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                event = rx.recv() => {
                    let Ok(event) = event else { break };
                    let now = self.now_ms();
                    if self.update(event, now).is_break() {
                        break;
                    }
                }
                _ = timer => {
                    let now = self.now_ms();
                    self.tick(now);
                }
                _ = tokio::signal::ctrl_c() => break,
            }
        }

        self.carousel.teardown();
        log::info!("Gallery closed");
    }
}
