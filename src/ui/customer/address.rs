use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::api::models::{Address, GenericMsgResponse, ReverseGeoCodeRequest};
use crate::api::{safe_call, SharedApi};
use crate::ui::mvi::{Observable, Signal};
use crate::ui::screen::{ErrorCatalog, ScreenModel, ScreenState};

const ADDRESS_LIST_ERRORS: ErrorCatalog =
    ErrorCatalog::new("Addresses Unavailable", "Failed to load your addresses");

const ADD_ADDRESS_ERRORS: ErrorCatalog =
    ErrorCatalog::new("Address Not Saved", "Failed to save the address");

/// Saved addresses with the one chosen for delivery.
pub struct AddressListModel {
    screen: ScreenModel<Vec<Address>>,
    api: SharedApi,
    selected: Observable<Option<Address>>,
}

impl AddressListModel {
    pub fn new(api: SharedApi) -> Self {
        Self {
            screen: ScreenModel::new("address_list", ADDRESS_LIST_ERRORS),
            api,
            selected: Observable::new(None),
        }
    }

    pub fn state(&self) -> ScreenState<Vec<Address>> {
        self.screen.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<Vec<Address>>> {
        self.screen.subscribe()
    }

    pub fn selected(&self) -> &Observable<Option<Address>> {
        &self.selected
    }

    pub fn load(&self) -> JoinHandle<()> {
        let api = SharedApi::clone(&self.api);
        self.screen.load(async move {
            safe_call(api.get_user_addresses())
                .await
                .map(|list| list.addresses)
        })
    }

    pub fn select(&self, address: Address) {
        self.selected.set(Some(address));
    }

    pub fn close(&self) {
        self.screen.close();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressEvent {
    AddressStored,
}

/// Picks a location, resolves it to an address and saves it.
pub struct AddAddressModel {
    location: ScreenModel<Address>,
    save: ScreenModel<GenericMsgResponse>,
    api: SharedApi,
    events: Signal<AddressEvent>,
}

impl AddAddressModel {
    pub fn new(api: SharedApi) -> Self {
        Self {
            location: ScreenModel::new("add_address", ADD_ADDRESS_ERRORS),
            save: ScreenModel::new("store_address", ADD_ADDRESS_ERRORS),
            api,
            events: Signal::new(),
        }
    }

    pub fn state(&self) -> ScreenState<Address> {
        self.location.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<Address>> {
        self.location.subscribe()
    }

    pub fn save_state(&self) -> ScreenState<GenericMsgResponse> {
        self.save.state()
    }

    pub fn events(&self) -> mpsc::UnboundedReceiver<AddressEvent> {
        self.events.subscribe()
    }

    pub fn reverse_geocode(&self, latitude: f64, longitude: f64) -> JoinHandle<()> {
        let api = SharedApi::clone(&self.api);
        let request = ReverseGeoCodeRequest {
            latitude,
            longitude,
        };
        self.location
            .load(async move { safe_call(api.reverse_geocode(&request)).await })
    }

    pub fn store(&self, address: Address) -> JoinHandle<()> {
        let api = SharedApi::clone(&self.api);
        let events = self.events.clone();
        self.save.load_then(
            async move { safe_call(api.store_address(&address)).await },
            move |_| {
                events.emit(AddressEvent::AddressStored);
            },
        )
    }

    pub fn close(&self) {
        self.location.close();
        self.save.close();
    }
}
