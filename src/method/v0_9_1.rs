//! AMQP 0-9-1 method table.
//!
//! Fields the 0-8 table named `ticket` (and other retired fields) are kept
//! on the wire as `reserved_*`.

use crate::protocol::ProtocolVersion;

amqp_methods! {
    version: ProtocolVersion::V0_9_1;

    // connection
    ConnectionStart = (10, 10, "connection.start") => dispatch_connection_start {
        version_major: Octet,
        version_minor: Octet,
        server_properties: Table,
        mechanisms: LongStr,
        locales: LongStr,
    }
    ConnectionStartOk = (10, 11, "connection.start-ok") => dispatch_connection_start_ok {
        client_properties: Table,
        mechanism: ShortStr,
        response: LongStr,
        locale: ShortStr,
    }
    ConnectionSecure = (10, 20, "connection.secure") => dispatch_connection_secure {
        challenge: LongStr,
    }
    ConnectionSecureOk = (10, 21, "connection.secure-ok") => dispatch_connection_secure_ok {
        response: LongStr,
    }
    ConnectionTune = (10, 30, "connection.tune") => dispatch_connection_tune {
        channel_max: Short,
        frame_max: Long,
        heartbeat: Short,
    }
    ConnectionTuneOk = (10, 31, "connection.tune-ok") => dispatch_connection_tune_ok {
        channel_max: Short,
        frame_max: Long,
        heartbeat: Short,
    }
    ConnectionOpen = (10, 40, "connection.open") => dispatch_connection_open {
        virtual_host: ShortStr,
        reserved_1: ShortStr,
        reserved_2: Bit,
    }
    ConnectionOpenOk = (10, 41, "connection.open-ok") => dispatch_connection_open_ok {
        reserved_1: ShortStr,
    }
    ConnectionClose = (10, 50, "connection.close") => dispatch_connection_close {
        reply_code: Short,
        reply_text: ShortStr,
        class_id: Short,
        method_id: Short,
    }
    ConnectionCloseOk = (10, 51, "connection.close-ok") => dispatch_connection_close_ok {}

    // channel
    ChannelOpen = (20, 10, "channel.open") => dispatch_channel_open {
        reserved_1: ShortStr,
    }
    ChannelOpenOk = (20, 11, "channel.open-ok") => dispatch_channel_open_ok {
        reserved_1: LongStr,
    }
    ChannelFlow = (20, 20, "channel.flow") => dispatch_channel_flow {
        active: Bit,
    }
    ChannelFlowOk = (20, 21, "channel.flow-ok") => dispatch_channel_flow_ok {
        active: Bit,
    }
    ChannelClose = (20, 40, "channel.close") => dispatch_channel_close {
        reply_code: Short,
        reply_text: ShortStr,
        class_id: Short,
        method_id: Short,
    }
    ChannelCloseOk = (20, 41, "channel.close-ok") => dispatch_channel_close_ok {}

    // exchange
    ExchangeDeclare = (40, 10, "exchange.declare") => dispatch_exchange_declare {
        reserved_1: Short,
        exchange: ShortStr,
        exchange_type: ShortStr,
        passive: Bit,
        durable: Bit,
        reserved_2: Bit,
        reserved_3: Bit,
        no_wait: Bit,
        arguments: Table,
    }
    ExchangeDeclareOk = (40, 11, "exchange.declare-ok") => dispatch_exchange_declare_ok {}
    ExchangeDelete = (40, 20, "exchange.delete") => dispatch_exchange_delete {
        reserved_1: Short,
        exchange: ShortStr,
        if_unused: Bit,
        no_wait: Bit,
    }
    ExchangeDeleteOk = (40, 21, "exchange.delete-ok") => dispatch_exchange_delete_ok {}

    // queue
    QueueDeclare = (50, 10, "queue.declare") => dispatch_queue_declare {
        reserved_1: Short,
        queue: ShortStr,
        passive: Bit,
        durable: Bit,
        exclusive: Bit,
        auto_delete: Bit,
        no_wait: Bit,
        arguments: Table,
    }
    QueueDeclareOk = (50, 11, "queue.declare-ok") => dispatch_queue_declare_ok {
        queue: ShortStr,
        message_count: Long,
        consumer_count: Long,
    }
    QueueBind = (50, 20, "queue.bind") => dispatch_queue_bind {
        reserved_1: Short,
        queue: ShortStr,
        exchange: ShortStr,
        routing_key: ShortStr,
        no_wait: Bit,
        arguments: Table,
    }
    QueueBindOk = (50, 21, "queue.bind-ok") => dispatch_queue_bind_ok {}
    QueuePurge = (50, 30, "queue.purge") => dispatch_queue_purge {
        reserved_1: Short,
        queue: ShortStr,
        no_wait: Bit,
    }
    QueuePurgeOk = (50, 31, "queue.purge-ok") => dispatch_queue_purge_ok {
        message_count: Long,
    }
    QueueDelete = (50, 40, "queue.delete") => dispatch_queue_delete {
        reserved_1: Short,
        queue: ShortStr,
        if_unused: Bit,
        if_empty: Bit,
        no_wait: Bit,
    }
    QueueDeleteOk = (50, 41, "queue.delete-ok") => dispatch_queue_delete_ok {
        message_count: Long,
    }
    QueueUnbind = (50, 50, "queue.unbind") => dispatch_queue_unbind {
        reserved_1: Short,
        queue: ShortStr,
        exchange: ShortStr,
        routing_key: ShortStr,
        arguments: Table,
    }
    QueueUnbindOk = (50, 51, "queue.unbind-ok") => dispatch_queue_unbind_ok {}

    // basic
    BasicQos = (60, 10, "basic.qos") => dispatch_basic_qos {
        prefetch_size: Long,
        prefetch_count: Short,
        global: Bit,
    }
    BasicQosOk = (60, 11, "basic.qos-ok") => dispatch_basic_qos_ok {}
    BasicConsume = (60, 20, "basic.consume") => dispatch_basic_consume {
        reserved_1: Short,
        queue: ShortStr,
        consumer_tag: ShortStr,
        no_local: Bit,
        no_ack: Bit,
        exclusive: Bit,
        no_wait: Bit,
        arguments: Table,
    }
    BasicConsumeOk = (60, 21, "basic.consume-ok") => dispatch_basic_consume_ok {
        consumer_tag: ShortStr,
    }
    BasicCancel = (60, 30, "basic.cancel") => dispatch_basic_cancel {
        consumer_tag: ShortStr,
        no_wait: Bit,
    }
    BasicCancelOk = (60, 31, "basic.cancel-ok") => dispatch_basic_cancel_ok {
        consumer_tag: ShortStr,
    }
    BasicPublish = (60, 40, "basic.publish") => dispatch_basic_publish {
        reserved_1: Short,
        exchange: ShortStr,
        routing_key: ShortStr,
        mandatory: Bit,
        immediate: Bit,
    }
    BasicReturn = (60, 50, "basic.return") => dispatch_basic_return {
        reply_code: Short,
        reply_text: ShortStr,
        exchange: ShortStr,
        routing_key: ShortStr,
    }
    BasicDeliver = (60, 60, "basic.deliver") => dispatch_basic_deliver {
        consumer_tag: ShortStr,
        delivery_tag: LongLong,
        redelivered: Bit,
        exchange: ShortStr,
        routing_key: ShortStr,
    }
    BasicGet = (60, 70, "basic.get") => dispatch_basic_get {
        reserved_1: Short,
        queue: ShortStr,
        no_ack: Bit,
    }
    BasicGetOk = (60, 71, "basic.get-ok") => dispatch_basic_get_ok {
        delivery_tag: LongLong,
        redelivered: Bit,
        exchange: ShortStr,
        routing_key: ShortStr,
        message_count: Long,
    }
    BasicGetEmpty = (60, 72, "basic.get-empty") => dispatch_basic_get_empty {
        reserved_1: ShortStr,
    }
    BasicAck = (60, 80, "basic.ack") => dispatch_basic_ack {
        delivery_tag: LongLong,
        multiple: Bit,
    }
    BasicReject = (60, 90, "basic.reject") => dispatch_basic_reject {
        delivery_tag: LongLong,
        requeue: Bit,
    }
    BasicRecoverAsync = (60, 100, "basic.recover-async") => dispatch_basic_recover_async {
        requeue: Bit,
    }
    BasicRecover = (60, 110, "basic.recover") => dispatch_basic_recover {
        requeue: Bit,
    }
    BasicRecoverOk = (60, 111, "basic.recover-ok") => dispatch_basic_recover_ok {}

    // tx
    TxSelect = (90, 10, "tx.select") => dispatch_tx_select {}
    TxSelectOk = (90, 11, "tx.select-ok") => dispatch_tx_select_ok {}
    TxCommit = (90, 20, "tx.commit") => dispatch_tx_commit {}
    TxCommitOk = (90, 21, "tx.commit-ok") => dispatch_tx_commit_ok {}
    TxRollback = (90, 30, "tx.rollback") => dispatch_tx_rollback {}
    TxRollbackOk = (90, 31, "tx.rollback-ok") => dispatch_tx_rollback_ok {}
}
